//! Primary-index in-memory store.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::CrudRepo;
use crate::entity::{EntityKey, Identifiable};
use crate::error::{ButikError, Result};

/// Generic store keeping a single `id -> entity` map.
///
/// Lenient by policy: `create` and `update` both upsert, and deleting an
/// unknown id is a no-op. Only blank ids are rejected.
#[derive(Debug)]
pub struct InMemoryRepo<T: Identifiable> {
    entities: RwLock<HashMap<T::Id, T>>,
}

impl<T: Identifiable> Default for InMemoryRepo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable> InMemoryRepo<T> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    fn put(&self, entity: T) -> Result<()> {
        let id = entity.id().clone();
        if id.is_blank() {
            return Err(ButikError::validation("entity id must not be blank"));
        }
        self.entities.write().insert(id, entity);
        Ok(())
    }
}

impl<T: Identifiable> CrudRepo<T> for InMemoryRepo<T> {
    fn create(&self, entity: T) -> Result<()> {
        tracing::debug!("InMemoryRepo create id={}", entity.id());
        self.put(entity)
    }

    fn update(&self, entity: T) -> Result<()> {
        tracing::debug!("InMemoryRepo update id={}", entity.id());
        self.put(entity)
    }

    fn delete(&self, id: &T::Id) -> Result<()> {
        if self.entities.write().remove(id).is_some() {
            tracing::debug!("InMemoryRepo delete id={}", id);
        }
        Ok(())
    }

    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>> {
        Ok(self.entities.read().get(id).cloned())
    }

    fn find_all(&self) -> Result<Vec<T>> {
        Ok(self.entities.read().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Customer;

    #[test]
    fn test_create_then_find() {
        let repo: InMemoryRepo<Customer> = InMemoryRepo::new();
        let alice = Customer::new("Alice", "Stockholm");
        repo.create(alice.clone()).unwrap();

        assert_eq!(repo.find_by_id(alice.id()).unwrap(), Some(alice));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_and_delete_are_lenient() {
        let repo: InMemoryRepo<Customer> = InMemoryRepo::new();
        let bob = Customer::new("Bob", "Gothenburg");

        // update on an unknown id upserts
        repo.update(bob.clone()).unwrap();
        assert_eq!(repo.len(), 1);

        repo.delete(bob.id()).unwrap();
        repo.delete(bob.id()).unwrap();
        assert!(repo.is_empty());
        assert_eq!(repo.find_by_id(bob.id()).unwrap(), None);
    }

    #[test]
    fn test_find_all_is_a_snapshot() {
        let a = Customer::new("A", "Lund");
        let b = Customer::new("B", "Lund");
        let repo: InMemoryRepo<Customer> = InMemoryRepo::new();
        repo.create(a.clone()).unwrap();
        repo.create(b).unwrap();

        let snapshot = repo.find_all().unwrap();
        repo.delete(a.id()).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }
}
