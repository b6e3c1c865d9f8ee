//! Repository layer abstractions and storage backends.
//!
//! # Responsibility
//! - Define the generic, entity-agnostic data access contract.
//! - Isolate storage details (in-memory map, SQLite) from the service layer.
//!
//! # Invariants
//! - Repositories never run validation; the service layer validates first.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidSortField`)
//!   in addition to storage transport errors.

pub mod memory_repo;
pub mod repository;
pub mod user_sqlite_repo;
