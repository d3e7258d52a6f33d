//! Text tables and JSON views for shell output.

use std::io::Write;

use serde::Serialize;

use butik::{Customer, Identifiable, Order, Product};

use super::OutputFormat;

const ITEMS_WIDTH: usize = 60;

#[derive(Serialize)]
struct OrderView<'a> {
    id: &'a str,
    customer_id: &'a str,
    lines: Vec<LineView>,
    total: f64,
}

#[derive(Serialize)]
struct LineView {
    product_id: String,
    name: String,
    quantity: usize,
    unit_price: f64,
    subtotal: f64,
}

fn order_view(order: &Order) -> OrderView<'_> {
    OrderView {
        id: order.id(),
        customer_id: order.customer_id(),
        lines: order
            .lines()
            .into_iter()
            .map(|line| LineView {
                product_id: line.product.id().clone(),
                name: line.product.name().to_string(),
                quantity: line.quantity,
                unit_price: line.product.price(),
                subtotal: line.subtotal(),
            })
            .collect(),
        total: order.total(),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// `Name xQty, ...`, cut to the table column width.
fn items_summary(order: &Order) -> String {
    let lines = order.lines();
    if lines.is_empty() {
        return "-".to_string();
    }
    let s = lines
        .iter()
        .map(|l| format!("{} x{}", l.product.name(), l.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    if s.chars().count() > ITEMS_WIDTH {
        let cut: String = s.chars().take(ITEMS_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        s
    }
}

pub fn customers<W: Write>(
    out: &mut W,
    format: OutputFormat,
    customers: &[Customer],
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, customers);
    }
    if customers.is_empty() {
        writeln!(out, "No customers found.")?;
        return Ok(());
    }
    writeln!(out, "{:<10} {:<24} {:<20}", "ID", "Name", "City")?;
    writeln!(out, "{}", "-".repeat(56))?;
    for c in customers {
        writeln!(out, "{:<10} {:<24} {:<20}", c.id(), c.name(), c.city())?;
    }
    Ok(())
}

pub fn products<W: Write>(
    out: &mut W,
    format: OutputFormat,
    products: &[Product],
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, products);
    }
    if products.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }
    writeln!(out, "{:<10} {:<26} {:<16} {:>10}", "ID", "Name", "Category", "Price")?;
    writeln!(out, "{}", "-".repeat(65))?;
    for p in products {
        writeln!(
            out,
            "{:<10} {:<26} {:<16} {:>10.2}",
            p.id(),
            p.name(),
            p.category(),
            p.price()
        )?;
    }
    Ok(())
}

pub fn orders<W: Write>(out: &mut W, format: OutputFormat, orders: &[Order]) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let views: Vec<OrderView<'_>> = orders.iter().map(order_view).collect();
        return write_json(out, &views);
    }
    if orders.is_empty() {
        writeln!(out, "No orders found.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<10} {:<10} {:<60} {:>10}",
        "ID", "Customer", "Products (qty)", "Total"
    )?;
    writeln!(out, "{}", "-".repeat(93))?;
    for o in orders {
        writeln!(
            out,
            "{:<10} {:<10} {:<60} {:>10.2}",
            o.id(),
            o.customer_id(),
            items_summary(o),
            o.total()
        )?;
    }
    Ok(())
}

pub fn customer<W: Write>(out: &mut W, format: OutputFormat, c: &Customer) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, c),
        OutputFormat::Text => {
            writeln!(out, "- ID: {}\n- Name: {}\n- City: {}", c.id(), c.name(), c.city())?;
            Ok(())
        }
    }
}

pub fn product<W: Write>(out: &mut W, format: OutputFormat, p: &Product) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, p),
        OutputFormat::Text => {
            writeln!(
                out,
                "- ID: {}\n- Name: {}\n- Category: {}\n- Price: {:.2}",
                p.id(),
                p.name(),
                p.category(),
                p.price()
            )?;
            Ok(())
        }
    }
}

pub fn order<W: Write>(out: &mut W, format: OutputFormat, o: &Order) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, &order_view(o));
    }
    writeln!(out, "- ID: {}\n- CustomerId: {}", o.id(), o.customer_id())?;
    writeln!(
        out,
        "{:<10} {:<26} {:>5} {:>10} {:>10}",
        "ProdID",
        "Name",
        "Qty",
        "Price",
        "Subtotal"
    )?;
    for line in o.lines() {
        writeln!(
            out,
            "{:<10} {:<26} {:>5} {:>10.2} {:>10.2}",
            line.product.id(),
            line.product.name(),
            line.quantity,
            line.product.price(),
            line.subtotal()
        )?;
    }
    writeln!(out, "- Total: {:.2}", o.total())?;
    Ok(())
}
