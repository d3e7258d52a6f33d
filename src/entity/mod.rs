//! Shop entities and the identity contract shared by every store.

pub mod customer;
pub mod order;
pub mod product;

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub use customer::Customer;
pub use order::{Order, OrderLine, MAX_LINE_QUANTITY};
pub use product::{Category, Product};

/// Bound for identifier types used as primary keys.
pub trait EntityKey: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// Whether the key is unusable as an identifier (empty or whitespace only).
    fn is_blank(&self) -> bool;
}

impl EntityKey for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

/// An entity that exposes a stable, unique identifier.
pub trait Identifiable: Clone + Send + Sync + 'static {
    type Id: EntityKey;

    /// Human-readable entity name used in messages, e.g. `"Customer"`.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}

/// Generates a short opaque id: the first 8 hex digits of a random UUID.
pub fn new_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
