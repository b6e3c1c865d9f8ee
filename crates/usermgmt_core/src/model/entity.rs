//! Entity contract and named-field accessor tables.
//!
//! # Responsibility
//! - Describe what a repository needs from a record type: identity and a
//!   registry of comparable scalar fields.
//! - Resolve sort field names to typed extractors without reflection.
//!
//! # Invariants
//! - Field name lookup is exact and case-sensitive.
//! - Values projected from one field always share the same `FieldValue`
//!   variant, so comparisons never mix kinds.

use chrono::NaiveDate;
use std::cmp::Ordering;

/// Store-assigned identifier. `0` marks an entity that was never persisted.
pub type EntityId = i64;

/// Comparable projection of one scalar entity field.
///
/// Variant order is `Null < Bool < Integer < Text < Date`; `Null` only shows up
/// for optional fields and sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Compared byte-wise (ordinal), not locale-aware.
    Text(String),
    Date(NaiveDate),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Null, Self::Date)
    }
}

/// One registered field: its public name and the function that projects it.
pub struct FieldAccessor<T> {
    pub name: &'static str,
    pub extract: fn(&T) -> FieldValue,
}

/// Explicit `name -> extractor` registry for an entity type.
///
/// Built once per type (see `Entity::fields`) and shared for the process
/// lifetime.
pub struct FieldTable<T> {
    accessors: Vec<FieldAccessor<T>>,
}

impl<T> FieldTable<T> {
    pub fn new(accessors: Vec<FieldAccessor<T>>) -> Self {
        Self { accessors }
    }

    /// Looks up a field by exact name.
    pub fn resolve(&self, name: &str) -> Option<&FieldAccessor<T>> {
        self.accessors.iter().find(|accessor| accessor.name == name)
    }

    /// Registered field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.iter().map(|accessor| accessor.name)
    }
}

impl<T> FieldAccessor<T> {
    /// Compares two entities by this field's natural ordering.
    pub fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.extract)(left).cmp(&(self.extract)(right))
    }
}

/// Record type managed by a `Repository`.
pub trait Entity: Clone + 'static {
    /// Type name used in not-found diagnostics, e.g. `User`.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> EntityId;

    /// Only the store calls this, once, when the entity is created.
    fn set_id(&mut self, id: EntityId);

    /// Sortable field registry for this type.
    fn fields() -> &'static FieldTable<Self>;
}
