//! Generic repository contract shared by all storage backends.
//!
//! # Responsibility
//! - Define CRUD + filtered/sorted query APIs over any `Entity`.
//! - Own the semantic error taxonomy (`NotFound`, `InvalidSortField`).
//! - Provide the one stable sort routine every backend orders results with.
//!
//! # Invariants
//! - Repositories never validate; callers validate before create/update.
//! - Callers receive owned copies; no API hands out references into store
//!   state.
//! - Sorting is stable in both directions: equal keys keep insertion order.

use crate::db::DbError;
use crate::model::entity::{Entity, EntityId, FieldAccessor};

pub type RepoResult<T> = Result<T, RepoError>;

/// Optional caller-supplied filter for `Repository::get`.
pub type Predicate<'a, T> = &'a dyn Fn(&T) -> bool;

/// Repository error for persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },
    #[error("unknown sort field `{0}`")]
    InvalidSortField(String),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl RepoError {
    pub fn not_found<T: Entity>(id: EntityId) -> Self {
        Self::NotFound {
            entity: T::ENTITY_NAME,
            id,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD and query contract for entities of type `T`.
pub trait Repository<T: Entity> {
    /// Stores `entity` under a newly assigned id and returns the stored copy.
    ///
    /// Any id already set on `entity` is ignored.
    fn create(&self, entity: T) -> RepoResult<T>;

    /// Returns the entity with exactly this id, or `NotFound`.
    fn get_by_id(&self, id: EntityId) -> RepoResult<T>;

    /// Returns every live entity in insertion order.
    fn get_all(&self) -> RepoResult<Vec<T>>;

    /// Returns entities passing `filter` (all when `None`), ordered by
    /// `sort_field`.
    ///
    /// # Errors
    /// - `InvalidSortField` when `sort_field` is not registered for `T`. This
    ///   is checked before any data is read.
    fn get(
        &self,
        filter: Option<Predicate<'_, T>>,
        sort_field: &str,
        descending: bool,
    ) -> RepoResult<Vec<T>>;

    /// Replaces all fields of the stored entity with the same id.
    ///
    /// # Errors
    /// - `NotFound` when no entity has `entity.id()`; updates never upsert.
    fn update(&self, entity: &T) -> RepoResult<()>;

    /// Removes the entity with this id, or fails with `NotFound`.
    fn delete(&self, id: EntityId) -> RepoResult<()>;
}

/// Resolves a sort field name against `T`'s field registry.
pub fn resolve_sort_field<T: Entity>(name: &str) -> RepoResult<&'static FieldAccessor<T>> {
    T::fields()
        .resolve(name)
        .ok_or_else(|| RepoError::InvalidSortField(name.to_string()))
}

/// Keeps entities passing `filter`, preserving input order.
pub fn apply_filter<T>(entities: Vec<T>, filter: Option<Predicate<'_, T>>) -> Vec<T> {
    match filter {
        Some(predicate) => entities
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect(),
        None => entities,
    }
}

/// Stable sort by one registered field.
///
/// Descending order reverses the comparator rather than the output, so ties
/// stay in their original relative order either way.
pub fn sort_by_field<T>(
    mut entities: Vec<T>,
    field: &FieldAccessor<T>,
    descending: bool,
) -> Vec<T> {
    entities.sort_by(|left, right| {
        let ordering = field.compare(left, right);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    entities
}

/// Filter-then-sort pipeline shared by backends that materialize rows first.
pub fn query_entities<T: Entity>(
    entities: Vec<T>,
    filter: Option<Predicate<'_, T>>,
    sort_field: &str,
    descending: bool,
) -> RepoResult<Vec<T>> {
    let field = resolve_sort_field::<T>(sort_field)?;
    Ok(sort_by_field(apply_filter(entities, filter), field, descending))
}
