//! In-memory repository backend.
//!
//! # Responsibility
//! - Hold the canonical entity collection for one process.
//! - Assign ids and serve CRUD/query calls under a single lock.
//!
//! # Invariants
//! - Ids are assigned monotonically starting at 1 and never reused, even
//!   after deletes.
//! - Entries are keyed by id; since ids only grow, key order is insertion
//!   order.
//! - Each write holds the write lock for its whole duration. Sequences of
//!   calls (e.g. get then update) are not atomic.

use crate::model::entity::{Entity, EntityId};
use crate::repo::repository::{
    query_entities, resolve_sort_field, Predicate, RepoError, RepoResult, Repository,
};
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;

struct StoreState<T> {
    entities: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

/// Thread-safe in-memory store for entities of type `T`.
pub struct InMemoryRepository<T: Entity> {
    state: RwLock<StoreState<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                entities: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store preloaded with `seed`, assigning ids `1..=seed.len()`
    /// in order. Seed entities are not validated.
    pub fn with_seed(seed: Vec<T>) -> Self {
        let repo = Self::new();
        {
            let mut state = repo.state.write();
            for entity in seed {
                insert_new(&mut state, entity);
            }
            debug!(
                "event=store_seed module=repo status=ok entity={} count={}",
                T::ENTITY_NAME,
                state.entities.len()
            );
        }
        repo
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.state.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_new<T: Entity>(state: &mut StoreState<T>, mut entity: T) -> T {
    let id = state.next_id;
    state.next_id += 1;
    entity.set_id(id);
    state.entities.insert(id, entity.clone());
    entity
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn create(&self, entity: T) -> RepoResult<T> {
        let stored = insert_new(&mut self.state.write(), entity);
        debug!(
            "event=entity_create module=repo status=ok entity={} id={}",
            T::ENTITY_NAME,
            stored.id()
        );
        Ok(stored)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        self.state
            .read()
            .entities
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found::<T>(id))
    }

    fn get_all(&self) -> RepoResult<Vec<T>> {
        Ok(self.state.read().entities.values().cloned().collect())
    }

    fn get(
        &self,
        filter: Option<Predicate<'_, T>>,
        sort_field: &str,
        descending: bool,
    ) -> RepoResult<Vec<T>> {
        resolve_sort_field::<T>(sort_field)?;
        // Snapshot under the read lock; the predicate runs without holding it.
        let snapshot = self.get_all()?;
        query_entities(snapshot, filter, sort_field, descending)
    }

    fn update(&self, entity: &T) -> RepoResult<()> {
        let mut state = self.state.write();
        let slot = state
            .entities
            .get_mut(&entity.id())
            .ok_or_else(|| RepoError::not_found::<T>(entity.id()))?;
        *slot = entity.clone();
        debug!(
            "event=entity_update module=repo status=ok entity={} id={}",
            T::ENTITY_NAME,
            entity.id()
        );
        Ok(())
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.entities.remove(&id).is_none() {
            return Err(RepoError::not_found::<T>(id));
        }
        debug!(
            "event=entity_delete module=repo status=ok entity={} id={}",
            T::ENTITY_NAME,
            id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRepository;
    use crate::model::user::{seed_users, User};
    use crate::repo::repository::{RepoError, Repository};

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::<User>::new();
        let first = repo
            .create(User::new("Ann", "Lee", "ann@example.com", true, None))
            .expect("first create");
        repo.delete(first.id).expect("delete first");
        let second = repo
            .create(User::new("Bob", "Lee", "bob@example.com", true, None))
            .expect("second create");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_ignores_caller_supplied_id() {
        let repo = InMemoryRepository::with_seed(seed_users());
        let mut user = User::new("Ann", "Lee", "ann@example.com", true, None);
        user.id = 3;
        let stored = repo.create(user).expect("create should succeed");
        assert_eq!(stored.id, 12);
        assert_eq!(repo.get_by_id(3).expect("seeded user 3").forename, "Castor");
    }

    #[test]
    fn unknown_sort_field_fails_on_empty_store() {
        let repo = InMemoryRepository::<User>::new();
        let err = repo.get(None, "Nickname", false).unwrap_err();
        assert!(matches!(err, RepoError::InvalidSortField(name) if name == "Nickname"));
    }

    #[test]
    fn returned_values_do_not_alias_store_state() {
        let repo = InMemoryRepository::with_seed(seed_users());
        let mut copy = repo.get_by_id(1).expect("seeded user 1");
        copy.email = "changed@example.com".to_string();
        assert_eq!(repo.get_by_id(1).expect("seeded user 1").email, "ploew@example.com");
    }

    #[test]
    fn len_tracks_creates_and_deletes() {
        let repo = InMemoryRepository::with_seed(seed_users());
        assert_eq!(repo.len(), 11);
        repo.delete(11).expect("delete last seeded user");
        assert_eq!(repo.len(), 10);
        assert!(!repo.is_empty());
    }
}
