//! Storage contract and the in-memory stores behind the services.

pub mod memory;
pub mod order_store;

use crate::entity::Identifiable;
use crate::error::Result;

pub use memory::InMemoryRepo;
pub use order_store::OrderStore;

/// Storage-agnostic CRUD over an identifiable entity type.
///
/// Stores decide their own strictness: whether `update`/`delete` on an
/// unknown id fail or pass silently, and whether `create` rejects a
/// duplicate id. Duplicate and existence checks the caller can rely on live
/// in [`crate::service::CrudService`].
pub trait CrudRepo<T: Identifiable>: Send + Sync {
    fn create(&self, entity: T) -> Result<()>;
    fn update(&self, entity: T) -> Result<()>;
    fn delete(&self, id: &T::Id) -> Result<()>;
    fn find_by_id(&self, id: &T::Id) -> Result<Option<T>>;
    /// Snapshot of every stored entity.
    fn find_all(&self) -> Result<Vec<T>>;
}
