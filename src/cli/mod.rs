mod commands;
mod render;
mod shell;

use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use butik::Category;

pub use shell::Session;

#[derive(Parser)]
#[command(name = "butik")]
#[command(about = "Interactive shop manager for customers, products and orders")]
#[command(version)]
#[command(after_long_help = r#"
Starts an interactive shell reading one command per line.

SHELL EXAMPLES:
    customer add "Anna Berg" Stockholm
    product add "Wireless Mouse" accessories 49
    order place <customer-id> <product-id>=2 <other-product-id>=1
    order add-item <order-id> <product-id> --qty 3
    order by-customer <customer-id>
    help
    quit
"#)]
pub struct Cli {
    /// Load demo customers, products and orders on startup
    #[arg(long)]
    pub seed: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One line typed into the shell.
#[derive(Parser)]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Place, edit and inspect orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// List product categories
    Categories,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
pub enum CustomerAction {
    /// Add a customer
    Add { name: String, city: String },

    /// List all customers
    List,

    /// Show one customer
    Show { id: String },

    /// Change name and/or city
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        city: Option<String>,
    },

    /// Delete a customer
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// Add a product
    Add {
        name: String,

        /// Category, e.g. accessories or office-supplies
        category: Category,

        #[arg(allow_negative_numbers = true)]
        price: f64,
    },

    /// List all products
    List {
        /// Only products in this category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show one product
    Show { id: String },

    /// Change name, category and/or price
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,
    },

    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// Place an order: `order place <customer-id> <product-id>=<qty>...`
    Place {
        customer: String,

        #[arg(required = true)]
        items: Vec<ItemArg>,
    },

    /// List all orders
    List,

    /// Show one order with its lines
    Show { id: String },

    /// List the orders of one customer
    ByCustomer { customer: String },

    /// Move an order to another customer
    Reassign { id: String, customer: String },

    /// Add units of a product to an order
    AddItem {
        id: String,
        product: String,

        #[arg(long, default_value = "1")]
        qty: usize,
    },

    /// Remove units of a product from an order
    RemoveItem {
        id: String,
        product: String,

        #[arg(long, default_value = "1")]
        qty: usize,
    },

    /// Set the exact quantity of a product in an order
    SetQty {
        id: String,
        product: String,
        qty: usize,
    },

    /// Delete an order
    Delete { id: String },
}

/// `<product-id>=<qty>`; a bare product id means quantity 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: String,
    pub qty: i64,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((product_id, qty)) => {
                let qty = qty
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("invalid quantity in '{s}'"))?;
                Ok(Self {
                    product_id: product_id.trim().to_string(),
                    qty,
                })
            }
            None => Ok(Self {
                product_id: s.trim().to_string(),
                qty: 1,
            }),
        }
    }
}
