pub mod entity;
pub mod error;
pub mod repo;
pub mod seed;
pub mod service;

pub use entity::{
    Category, Customer, EntityKey, Identifiable, Order, OrderLine, Product, MAX_LINE_QUANTITY,
};
pub use error::{ButikError, ErrorKind, Result};
pub use repo::{CrudRepo, InMemoryRepo, OrderStore};
pub use seed::{seed, SeedSummary};
pub use service::{
    CrudService, CustomerService, NoPolicy, OrderRules, OrderService, ProductRules,
    ProductService, ServicePolicy, Services,
};
