//! Core domain logic for the user management admin.
//! This crate owns record storage, validation and list paging; web and view
//! layers consume it through `UserService`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, EntityId, FieldAccessor, FieldTable, FieldValue};
pub use model::user::{seed_users, User};
pub use pagination::{paginate, Page};
pub use repo::memory_repo::InMemoryRepository;
pub use repo::repository::{Predicate, RepoError, RepoResult, Repository};
pub use repo::user_sqlite_repo::SqliteUserRepository;
pub use service::user_service::{
    ServiceError, ServiceResult, UserListQuery, UserService, DEFAULT_SORT_FIELD,
};
pub use validation::{
    ensure_valid, validate_user, validate_user_on, ValidationError, ValidationErrorKind,
    ValidationErrors,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
