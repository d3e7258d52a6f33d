//! Order store with a secondary customer index.
//!
//! Two maps are kept in step:
//! - primary: `order id -> Order`
//! - secondary: `customer id -> [order id]`, in insertion order
//!
//! Both live behind one lock, so every mutation rewrites them in a single
//! critical section and readers never see one map ahead of the other.
//! Index entries are created on first use and dropped as soon as they empty.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::CrudRepo;
use crate::entity::{EntityKey, Identifiable, Order};
use crate::error::{ButikError, Result};

#[derive(Debug, Default)]
struct Indexes {
    by_id: HashMap<String, Order>,
    by_customer: HashMap<String, Vec<String>>,
}

impl Indexes {
    fn index_customer(&mut self, customer_id: &str, order_id: &str) {
        let ids = self.by_customer.entry(customer_id.to_string()).or_default();
        if !ids.iter().any(|id| id == order_id) {
            ids.push(order_id.to_string());
        }
    }

    fn deindex_customer(&mut self, customer_id: &str, order_id: &str) {
        let Some(ids) = self.by_customer.get_mut(customer_id) else {
            return;
        };
        ids.retain(|id| id != order_id);
        if ids.is_empty() {
            self.by_customer.remove(customer_id);
        }
    }
}

/// Strict store for orders: duplicate creates, and updates or deletes of
/// unknown ids, are errors.
#[derive(Debug, Default)]
pub struct OrderStore {
    inner: RwLock<Indexes>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order ids for a customer, oldest first. Empty if the customer has none.
    pub fn order_ids_for(&self, customer_id: &str) -> Vec<String> {
        self.inner
            .read()
            .by_customer
            .get(customer_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Orders for a customer, oldest first.
    pub fn find_by_customer(&self, customer_id: &str) -> Vec<Order> {
        let inner = self.inner.read();
        inner
            .by_customer
            .get(customer_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Customer ids that currently have at least one order.
    pub fn indexed_customers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.read().by_customer.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }
}

fn require_id(order: &Order) -> Result<String> {
    let id = order.id();
    if id.is_blank() {
        return Err(ButikError::validation("order id must not be null/blank"));
    }
    Ok(id.clone())
}

impl CrudRepo<Order> for OrderStore {
    fn create(&self, order: Order) -> Result<()> {
        let id = require_id(&order)?;
        let mut inner = self.inner.write();
        if inner.by_id.contains_key(&id) {
            return Err(ButikError::duplicate(format!("duplicate order id: {id}")));
        }
        inner.index_customer(order.customer_id(), &id);
        tracing::debug!("OrderStore create id={} customer={}", id, order.customer_id());
        inner.by_id.insert(id, order);
        Ok(())
    }

    fn update(&self, order: Order) -> Result<()> {
        let id = require_id(&order)?;
        let mut inner = self.inner.write();
        let previous_customer = match inner.by_id.get(&id) {
            Some(old) => old.customer_id().to_string(),
            None => return Err(ButikError::not_found(format!("order not found: {id}"))),
        };
        if previous_customer != order.customer_id() {
            inner.deindex_customer(&previous_customer, &id);
            inner.index_customer(order.customer_id(), &id);
            tracing::debug!(
                "OrderStore reindex id={} customer {} -> {}",
                id,
                previous_customer,
                order.customer_id()
            );
        }
        inner.by_id.insert(id, order);
        Ok(())
    }

    fn delete(&self, id: &String) -> Result<()> {
        let mut inner = self.inner.write();
        let removed = inner
            .by_id
            .remove(id)
            .ok_or_else(|| ButikError::not_found(format!("order not found: {id}")))?;
        inner.deindex_customer(removed.customer_id(), id);
        tracing::debug!("OrderStore delete id={}", id);
        Ok(())
    }

    fn find_by_id(&self, id: &String) -> Result<Option<Order>> {
        Ok(self.inner.read().by_id.get(id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Order>> {
        Ok(self.inner.read().by_id.values().cloned().collect())
    }
}
