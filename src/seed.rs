//! Demo data for trying the shell without typing a catalogue first.

use serde::Serialize;

use crate::entity::{Category, Customer, Identifiable, Product};
use crate::error::Result;
use crate::service::Services;

const CUSTOMERS: &[(&str, &str)] = &[
    ("Alice", "Stockholm"),
    ("Bob", "Gothenburg"),
    ("Charlie", "Malmö"),
    ("David", "Uppsala"),
    ("Eva", "Västerås"),
    ("John", "Lund"),
    ("Grace", "Linköping"),
    ("Harry", "Örebro"),
    ("Ivy", "Gothenburg"),
    ("Jack", "Stockholm"),
];

const PRODUCTS: &[(&str, Category, f64)] = &[
    ("Laptop 15\"", Category::Computers, 1199.00),
    ("Gaming Laptop", Category::Computers, 1599.00),
    ("Ultrabook 14\"", Category::Computers, 999.00),
    ("Desktop Tower", Category::Computers, 899.00),
    ("Chromebook 13\"", Category::Computers, 349.00),
    ("Android Smartphone", Category::Smartphones, 699.00),
    ("iOS Smartphone", Category::Smartphones, 999.00),
    ("Budget Smartphone", Category::Smartphones, 249.00),
    ("Tablet 10\"", Category::Smartphones, 329.00),
    ("27\" Monitor", Category::Electronics, 279.00),
    ("34\" Ultrawide Monitor", Category::Electronics, 599.00),
    ("Mechanical Keyboard", Category::Accessories, 129.00),
    ("Wireless Mouse", Category::Accessories, 49.00),
    ("USB-C Hub 7-in-1", Category::Accessories, 59.00),
    ("External SSD 1TB", Category::Storage, 119.00),
    ("NVMe SSD 2TB", Category::Storage, 189.00),
    ("Game Controller", Category::Gaming, 69.00),
    ("Mirrorless Camera", Category::Photography, 899.00),
    ("Tripod", Category::Photography, 69.00),
    ("Smartwatch", Category::Wearables, 249.00),
    ("Printer", Category::Printers, 199.00),
    ("A4 Paper (500)", Category::OfficeSupplies, 9.99),
    ("Standing Desk", Category::Furniture, 399.00),
    ("LED Desk Lamp", Category::Lighting, 29.00),
    ("Notebook Set", Category::Stationery, 12.00),
    ("Wi-Fi 6 Router", Category::Network, 129.00),
    ("Cat6 Cable 10m", Category::Network, 12.00),
    ("Espresso Machine", Category::Kitchen, 299.00),
    ("Vacuum Cleaner", Category::HomeAppliances, 149.00),
];

/// Order templates as `(index into PRODUCTS, quantity)` pairs.
const ORDERS: &[&[(usize, i64)]] = &[
    &[(0, 1), (12, 1)],
    &[(1, 1), (16, 2)],
    &[(2, 1), (13, 1)],
    &[(3, 1), (9, 2), (11, 1)],
    &[(4, 1)],
    &[(5, 1), (19, 1)],
    &[(6, 1)],
    &[(21, 5), (24, 3), (23, 1)],
    &[(17, 1), (18, 1)],
    &[(25, 1), (26, 4)],
    &[(27, 1)],
    &[(22, 1), (28, 1)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

/// Loads the demo catalogue through the service layer.
///
/// Orders are handed to customers round-robin.
pub fn seed(services: &Services) -> Result<SeedSummary> {
    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, city) in CUSTOMERS {
        let customer = services.customers.create(Customer::new(*name, *city))?;
        customer_ids.push(customer.id().clone());
    }

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for (name, category, price) in PRODUCTS {
        let product = services
            .products
            .create(Product::new(*name, *category, *price)?)?;
        product_ids.push(product.id().clone());
    }

    for (i, template) in ORDERS.iter().enumerate() {
        let customer_id = &customer_ids[i % customer_ids.len()];
        let items = template
            .iter()
            .map(|(idx, qty)| (product_ids[*idx].as_str(), *qty));
        services.orders.place(customer_id, items)?;
    }

    let summary = SeedSummary {
        customers: customer_ids.len(),
        products: product_ids.len(),
        orders: ORDERS.len(),
    };
    tracing::info!(
        "Seeded {} customers, {} products, {} orders",
        summary.customers,
        summary.products,
        summary.orders
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_every_store() {
        let services = Services::in_memory();
        let summary = seed(&services).unwrap();

        assert_eq!(summary.customers, services.customers.count().unwrap());
        assert_eq!(summary.products, services.products.count().unwrap());
        assert_eq!(summary.orders, services.orders.count().unwrap());
    }

    #[test]
    fn test_seed_orders_spread_round_robin() {
        let services = Services::in_memory();
        seed(&services).unwrap();

        // 12 orders over 10 customers: the first two customers get two each
        let mut per_customer: Vec<usize> = services
            .customers
            .get_all()
            .unwrap()
            .iter()
            .map(|c| services.orders.orders_for_customer(c.id()).unwrap().len())
            .collect();
        per_customer.sort_unstable();
        assert_eq!(per_customer.iter().sum::<usize>(), ORDERS.len());
        assert_eq!(per_customer.last(), Some(&2));
        assert_eq!(per_customer.first(), Some(&1));
    }

    #[test]
    fn test_templates_reference_known_products() {
        for template in ORDERS {
            assert!(!template.is_empty());
            for (idx, qty) in template.iter() {
                assert!(*idx < PRODUCTS.len());
                assert!(*qty > 0);
            }
        }
    }
}
