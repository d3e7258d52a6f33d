use super::ServicePolicy;
use crate::entity::product::ensure_price;
use crate::entity::Product;
use crate::error::Result;

/// Prices must stay finite and non-negative on every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRules;

impl ServicePolicy<Product> for ProductRules {
    fn check_create(&self, product: &Product) -> Result<()> {
        ensure_price(product.price())
    }

    fn check_update(&self, product: &Product) -> Result<()> {
        ensure_price(product.price())
    }
}
