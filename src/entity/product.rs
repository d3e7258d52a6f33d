use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{new_id, Identifiable};
use crate::error::{ButikError, Result};

/// Product categories offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    // Technology
    Electronics,
    Computers,
    Smartphones,
    Accessories,
    Wearables,
    Gaming,
    // Office and work
    OfficeSupplies,
    Furniture,
    Stationery,
    Printers,
    // Home and lifestyle
    HomeAppliances,
    Kitchen,
    Decor,
    Lighting,
    // Clothing and personal
    Fashion,
    Shoes,
    Beauty,
    Sports,
    Health,
    // Misc
    Toys,
    Books,
    Automotive,
    Garden,
    Storage,
    Photography,
    Network,
    PetSupplies,
}

impl Category {
    pub const ALL: [Category; 27] = [
        Category::Electronics,
        Category::Computers,
        Category::Smartphones,
        Category::Accessories,
        Category::Wearables,
        Category::Gaming,
        Category::OfficeSupplies,
        Category::Furniture,
        Category::Stationery,
        Category::Printers,
        Category::HomeAppliances,
        Category::Kitchen,
        Category::Decor,
        Category::Lighting,
        Category::Fashion,
        Category::Shoes,
        Category::Beauty,
        Category::Sports,
        Category::Health,
        Category::Toys,
        Category::Books,
        Category::Automotive,
        Category::Garden,
        Category::Storage,
        Category::Photography,
        Category::Network,
        Category::PetSupplies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Computers => "COMPUTERS",
            Category::Smartphones => "SMARTPHONES",
            Category::Accessories => "ACCESSORIES",
            Category::Wearables => "WEARABLES",
            Category::Gaming => "GAMING",
            Category::OfficeSupplies => "OFFICE_SUPPLIES",
            Category::Furniture => "FURNITURE",
            Category::Stationery => "STATIONERY",
            Category::Printers => "PRINTERS",
            Category::HomeAppliances => "HOME_APPLIANCES",
            Category::Kitchen => "KITCHEN",
            Category::Decor => "DECOR",
            Category::Lighting => "LIGHTING",
            Category::Fashion => "FASHION",
            Category::Shoes => "SHOES",
            Category::Beauty => "BEAUTY",
            Category::Sports => "SPORTS",
            Category::Health => "HEALTH",
            Category::Toys => "TOYS",
            Category::Books => "BOOKS",
            Category::Automotive => "AUTOMOTIVE",
            Category::Garden => "GARDEN",
            Category::Storage => "STORAGE",
            Category::Photography => "PHOTOGRAPHY",
            Category::Network => "NETWORK",
            Category::PetSupplies => "PET_SUPPLIES",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ButikError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ButikError::validation(format!("unknown category: {}", s.trim())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    category: Category,
    price: f64,
}

impl Product {
    /// Fails with a validation error when `price` is negative or not finite.
    pub fn new(name: impl Into<String>, category: Category, price: f64) -> Result<Self> {
        ensure_price(price)?;
        Ok(Self {
            id: new_id(),
            name: name.into(),
            category,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_price(&mut self, price: f64) -> Result<()> {
        ensure_price(price)?;
        self.price = price;
        Ok(())
    }
}

impl Identifiable for Product {
    type Id = String;

    const KIND: &'static str = "Product";

    fn id(&self) -> &String {
        &self.id
    }
}

pub(crate) fn ensure_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ButikError::validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}
