//! Domain model for managed records.
//!
//! # Responsibility
//! - Define the `Entity` contract every repository-managed record satisfies.
//! - Define the concrete `User` record and its seed data.
//!
//! # Invariants
//! - Every stored entity is identified by a store-assigned `EntityId`.
//! - Sortable fields are registered explicitly per entity type; there is no
//!   reflection-based lookup by name.

pub mod entity;
pub mod user;
