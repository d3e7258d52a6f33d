//! Order rules and the place-order flow.

use std::sync::Arc;

use super::{CrudService, CustomerService, OrderService, ProductService, ServicePolicy};
use crate::entity::order::ensure_line_quantity;
use crate::entity::{Identifiable, Order, Product};
use crate::error::{ButikError, Result};
use crate::repo::OrderStore;

/// Domain rules for orders: the customer must exist and the order must
/// contain at least one product.
///
/// The customer and product services are shared with the rest of the
/// application; this policy only reads from them.
pub struct OrderRules {
    customers: Arc<CustomerService>,
    products: Arc<ProductService>,
}

impl OrderRules {
    pub fn new(customers: Arc<CustomerService>, products: Arc<ProductService>) -> Self {
        Self {
            customers,
            products,
        }
    }

    fn ensure_customer_exists(&self, customer_id: &str) -> Result<()> {
        if customer_id.trim().is_empty() {
            return Err(ButikError::validation("customerId must not be empty"));
        }
        match self.customers.find_optional_by_id(&customer_id.to_string())? {
            Some(_) => Ok(()),
            None => Err(ButikError::not_found(format!(
                "Customer not found: {customer_id}"
            ))),
        }
    }

    fn ensure_products_not_empty(products: &[Product]) -> Result<()> {
        if products.is_empty() {
            return Err(ButikError::validation(
                "Order must contain at least one product",
            ));
        }
        Ok(())
    }
}

impl ServicePolicy<Order> for OrderRules {
    fn check_create(&self, order: &Order) -> Result<()> {
        Self::ensure_products_not_empty(order.products())?;
        self.ensure_customer_exists(order.customer_id())
    }

    fn check_update(&self, order: &Order) -> Result<()> {
        Self::ensure_products_not_empty(order.products())?;
        self.ensure_customer_exists(order.customer_id())
    }
}

impl OrderService {
    pub fn with_collaborators(
        store: Arc<OrderStore>,
        products: Arc<ProductService>,
        customers: Arc<CustomerService>,
    ) -> Self {
        CrudService::with_policy(store, OrderRules::new(customers, products))
    }

    pub fn customers(&self) -> &CustomerService {
        &self.policy().customers
    }

    pub fn products(&self) -> &ProductService {
        &self.policy().products
    }

    /// Places an order for `customer_id` from `(product id, quantity)` pairs.
    ///
    /// Each pair expands into `quantity` copies of the product, priced as it
    /// is stored right now. Repeated product ids add up, keeping the position
    /// of their first appearance. A product may total at most
    /// [`MAX_LINE_QUANTITY`](crate::entity::MAX_LINE_QUANTITY) units. The
    /// resulting order goes through [`CrudService::create`], so the order
    /// rules are checked again there.
    pub fn place<I, K>(&self, customer_id: &str, items: I) -> Result<Order>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        if customer_id.trim().is_empty() {
            return Err(ButikError::validation("customerId is empty"));
        }
        if self
            .customers()
            .find_optional_by_id(&customer_id.to_string())?
            .is_none()
        {
            return Err(ButikError::not_found(format!(
                "Customer not found: {customer_id}"
            )));
        }

        let mut wanted: Vec<(Product, usize)> = Vec::new();
        for (product_id, qty) in items {
            let product_id = product_id.as_ref();
            let product = self
                .products()
                .find_optional_by_id(&product_id.to_string())?
                .ok_or_else(|| {
                    ButikError::not_found(format!("Product not found: {product_id}"))
                })?;
            let invalid_qty =
                || ButikError::validation(format!("Invalid qty for {product_id}: {qty}"));
            if qty <= 0 {
                return Err(invalid_qty());
            }
            let qty = usize::try_from(qty).map_err(|_| invalid_qty())?;
            match wanted.iter_mut().find(|(p, _)| p.id() == product.id()) {
                Some((_, n)) => {
                    let merged = n.checked_add(qty).ok_or_else(invalid_qty)?;
                    ensure_line_quantity(product_id, merged)?;
                    *n = merged;
                }
                None => {
                    ensure_line_quantity(product_id, qty)?;
                    wanted.push((product, qty));
                }
            }
        }
        if wanted.is_empty() {
            return Err(ButikError::validation("Order has no items"));
        }

        let mut products = Vec::new();
        for (product, qty) in &wanted {
            products.extend(std::iter::repeat(product).take(*qty).cloned());
        }

        let order = self.create(Order::new(customer_id, products))?;
        tracing::info!(
            "Order placed id={} customer={} items={} total={:.2}",
            order.id(),
            customer_id,
            order.products().len(),
            order.total()
        );
        Ok(order)
    }

    /// Orders belonging to an existing customer, oldest first.
    pub fn orders_for_customer(&self, customer_id: &str) -> Result<Vec<Order>> {
        self.policy().ensure_customer_exists(customer_id)?;
        Ok(self.repo().find_by_customer(customer_id))
    }
}
