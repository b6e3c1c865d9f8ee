//! User use-case service.
//!
//! # Responsibility
//! - Provide list/detail/create/edit/delete entry points for the admin UI.
//! - Run validation before every write; delegate storage to a repository.
//! - Compose filter, sort and pagination for list screens.
//!
//! # Invariants
//! - No write reaches the repository without passing `validate_user`.
//! - Service APIs never bypass repository not-found semantics.
//! - The service is storage-agnostic: any `Repository<User>` works.

use crate::config::AppConfig;
use crate::model::entity::EntityId;
use crate::model::user::User;
use crate::pagination::{paginate, Page};
use crate::repo::repository::{RepoError, Repository};
use crate::validation::{ensure_valid, ValidationErrors};
use log::{info, warn};

/// Sort column used when a list request names none.
pub const DEFAULT_SORT_FIELD: &str = "Id";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ServiceError {
    /// True when the target user does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repo(RepoError::NotFound { .. }))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// List screen request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListQuery {
    /// `Some(flag)` keeps only users whose `is_active == flag`.
    pub is_active: Option<bool>,
    /// Registered field name; `None` sorts by `Id`.
    pub sort_field: Option<String>,
    pub descending: bool,
    /// 1-based; values below 1 are clamped to 1.
    pub page_index: usize,
    /// `None` uses the service default; values are clamped into `1..=max`.
    pub page_size: Option<usize>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            is_active: None,
            sort_field: None,
            descending: false,
            page_index: 1,
            page_size: None,
        }
    }
}

/// Use-case service over any user repository.
pub struct UserService<R: Repository<User>> {
    repo: R,
    default_page_size: usize,
    max_page_size: usize,
}

impl<R: Repository<User>> UserService<R> {
    /// Creates a service with page size 10 (max 50).
    pub fn new(repo: R) -> Self {
        Self::with_page_sizes(repo, 10, 50)
    }

    /// Creates a service with explicit list page sizes.
    pub fn with_page_sizes(repo: R, default_page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            repo,
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    /// Creates a service using the page sizes from `config`.
    pub fn from_config(repo: R, config: &AppConfig) -> Self {
        Self::with_page_sizes(repo, config.default_page_size, config.max_page_size)
    }

    /// Underlying repository, e.g. for seeding or inspection.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns one page of users for the list screen.
    pub fn list_users(&self, query: &UserListQuery) -> ServiceResult<Page<User>> {
        let sort_field = query.sort_field.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let users = match query.is_active {
            Some(flag) => self.filter_by_active(flag, sort_field, query.descending)?,
            None => self.get_all(sort_field, query.descending)?,
        };

        let page_index = query.page_index.max(1);
        let page_size = query
            .page_size
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size);
        Ok(paginate(users, page_index, page_size))
    }

    /// Users whose active flag equals `is_active`, sorted.
    pub fn filter_by_active(
        &self,
        is_active: bool,
        sort_field: &str,
        descending: bool,
    ) -> ServiceResult<Vec<User>> {
        let filter = move |user: &User| user.is_active == is_active;
        Ok(self.repo.get(Some(&filter), sort_field, descending)?)
    }

    /// All users, sorted.
    pub fn get_all(&self, sort_field: &str, descending: bool) -> ServiceResult<Vec<User>> {
        Ok(self.repo.get(None, sort_field, descending)?)
    }

    pub fn get_user(&self, id: EntityId) -> ServiceResult<User> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Validates and stores a new user; returns it with its assigned id.
    pub fn create_user(&self, user: User) -> ServiceResult<User> {
        if let Err(errors) = ensure_valid(&user) {
            warn!(
                "event=user_create module=service status=rejected error_count={}",
                errors.errors().len()
            );
            return Err(errors.into());
        }

        let stored = self.repo.create(user)?;
        info!(
            "event=user_create module=service status=ok id={}",
            stored.id
        );
        Ok(stored)
    }

    /// Validates and replaces an existing user's fields.
    pub fn update_user(&self, user: &User) -> ServiceResult<()> {
        if let Err(errors) = ensure_valid(user) {
            warn!(
                "event=user_update module=service status=rejected id={} error_count={}",
                user.id,
                errors.errors().len()
            );
            return Err(errors.into());
        }

        self.repo.update(user).inspect_err(|err| {
            warn!(
                "event=user_update module=service status=error id={} error={}",
                user.id, err
            );
        })?;
        info!("event=user_update module=service status=ok id={}", user.id);
        Ok(())
    }

    pub fn delete_user(&self, id: EntityId) -> ServiceResult<()> {
        self.repo.delete(id).inspect_err(|err| {
            warn!(
                "event=user_delete module=service status=error id={} error={}",
                id, err
            );
        })?;
        info!("event=user_delete module=service status=ok id={}", id);
        Ok(())
    }
}
