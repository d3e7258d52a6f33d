use serde::{Deserialize, Serialize};

use super::{new_id, Identifiable, Product};
use crate::error::{ButikError, Result};

/// Most units of a single product one order may hold.
pub const MAX_LINE_QUANTITY: usize = 1_000;

pub(crate) fn ensure_line_quantity(product_id: &str, quantity: usize) -> Result<()> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(ButikError::validation(format!(
            "quantity for {product_id} must be at most {MAX_LINE_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

/// An order placed by a customer.
///
/// Quantity is expressed by repetition: a product appearing three times in
/// `products` was ordered three times. Each entry is a snapshot of the
/// product taken when it was added to the order. The total is never stored;
/// [`Order::total`] sums the entries on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    customer_id: String,
    products: Vec<Product>,
}

/// A product grouped with the number of times it occurs in an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: usize,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.product.price() * self.quantity as f64
    }
}

impl Order {
    pub fn new(customer_id: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            id: new_id(),
            customer_id: customer_id.into(),
            products,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn total(&self) -> f64 {
        self.products.iter().map(Product::price).sum()
    }

    /// Groups repeated products, in order of first appearance.
    pub fn lines(&self) -> Vec<OrderLine> {
        let mut lines: Vec<OrderLine> = Vec::new();
        for product in &self.products {
            match lines.iter_mut().find(|l| l.product.id() == product.id()) {
                Some(line) => line.quantity += 1,
                None => lines.push(OrderLine {
                    product: product.clone(),
                    quantity: 1,
                }),
            }
        }
        lines
    }

    pub fn quantity_of(&self, product_id: &str) -> usize {
        self.products.iter().filter(|p| p.id() == product_id).count()
    }

    pub fn set_customer_id(&mut self, customer_id: impl Into<String>) {
        self.customer_id = customer_id.into();
    }

    /// Appends `quantity` copies of the product. Fails without touching the
    /// order if the product would exceed [`MAX_LINE_QUANTITY`].
    pub fn add_product(&mut self, product: &Product, quantity: usize) -> Result<()> {
        let wanted = self.quantity_of(product.id()).saturating_add(quantity);
        ensure_line_quantity(product.id(), wanted)?;
        self.push_copies(product, quantity);
        Ok(())
    }

    /// Removes up to `quantity` occurrences of the product, returning how many were removed.
    pub fn remove_product(&mut self, product_id: &str, quantity: usize) -> usize {
        let mut removed = 0;
        self.products.retain(|p| {
            if removed < quantity && p.id() == product_id {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Replaces every occurrence of the product with exactly `quantity` copies.
    pub fn set_quantity(&mut self, product: &Product, quantity: usize) -> Result<()> {
        ensure_line_quantity(product.id(), quantity)?;
        self.products.retain(|p| p.id() != product.id());
        self.push_copies(product, quantity);
        Ok(())
    }

    pub fn clear_products(&mut self) {
        self.products.clear();
    }

    fn push_copies(&mut self, product: &Product, quantity: usize) {
        self.products
            .extend(std::iter::repeat(product).take(quantity).cloned());
    }
}

impl Identifiable for Order {
    type Id = String;

    const KIND: &'static str = "Order";

    fn id(&self) -> &String {
        &self.id
    }
}
