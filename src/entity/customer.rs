use serde::{Deserialize, Serialize};

use super::{new_id, Identifiable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: String,
    name: String,
    city: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            city: city.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }
}

impl Identifiable for Customer {
    type Id = String;

    const KIND: &'static str = "Customer";

    fn id(&self) -> &String {
        &self.id
    }
}
