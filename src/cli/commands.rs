use std::io::Write;

use butik::{Category, Customer, Identifiable, Product, Services};

use super::{render, CustomerAction, ItemArg, OrderAction, OutputFormat, ProductAction};

pub fn customer<W: Write>(
    services: &Services,
    out: &mut W,
    format: OutputFormat,
    action: CustomerAction,
) -> anyhow::Result<()> {
    let customers = &services.customers;
    match action {
        CustomerAction::Add { name, city } => {
            let created = customers.create(Customer::new(name, city))?;
            writeln!(out, "✓ Customer created. ID: {}", created.id())?;
            render::customer(out, format, &created)?;
        }
        CustomerAction::List => {
            let mut all = customers.get_all()?;
            all.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
            render::customers(out, format, &all)?;
        }
        CustomerAction::Show { id } => match customers.find_optional_by_id(&id)? {
            Some(c) => render::customer(out, format, &c)?,
            None => writeln!(out, "Not found.")?,
        },
        CustomerAction::Update { id, name, city } => {
            let mut c = customers.require_by_id(&id)?;
            if let Some(name) = name {
                c.set_name(name);
            }
            if let Some(city) = city {
                c.set_city(city);
            }
            let updated = customers.update(c)?;
            writeln!(out, "✓ Customer updated.")?;
            render::customer(out, format, &updated)?;
        }
        CustomerAction::Delete { id } => {
            customers.delete(&id)?;
            writeln!(out, "✓ Deleted successfully.")?;
        }
    }
    Ok(())
}

pub fn product<W: Write>(
    services: &Services,
    out: &mut W,
    format: OutputFormat,
    action: ProductAction,
) -> anyhow::Result<()> {
    let products = &services.products;
    match action {
        ProductAction::Add {
            name,
            category,
            price,
        } => {
            let created = products.create(Product::new(name, category, price)?)?;
            writeln!(out, "✓ Product created. ID: {}", created.id())?;
            render::product(out, format, &created)?;
        }
        ProductAction::List { category } => {
            let mut all: Vec<Product> = products
                .get_all()?
                .into_iter()
                .filter(|p| category.map_or(true, |c| p.category() == c))
                .collect();
            all.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
            render::products(out, format, &all)?;
        }
        ProductAction::Show { id } => match products.find_optional_by_id(&id)? {
            Some(p) => render::product(out, format, &p)?,
            None => writeln!(out, "Not found.")?,
        },
        ProductAction::Update {
            id,
            name,
            category,
            price,
        } => {
            let mut p = products.require_by_id(&id)?;
            if let Some(name) = name {
                p.set_name(name);
            }
            if let Some(category) = category {
                p.set_category(category);
            }
            if let Some(price) = price {
                p.set_price(price)?;
            }
            let updated = products.update(p)?;
            writeln!(out, "✓ Product updated.")?;
            render::product(out, format, &updated)?;
        }
        ProductAction::Delete { id } => {
            products.delete(&id)?;
            writeln!(out, "✓ Deleted successfully.")?;
        }
    }
    Ok(())
}

pub fn order<W: Write>(
    services: &Services,
    out: &mut W,
    format: OutputFormat,
    action: OrderAction,
) -> anyhow::Result<()> {
    let orders = &services.orders;
    match action {
        OrderAction::Place { customer, items } => {
            let items = items
                .into_iter()
                .map(|ItemArg { product_id, qty }| (product_id, qty));
            let placed = orders.place(&customer, items)?;
            writeln!(
                out,
                "✓ Order created. ID: {} | Total: {:.2}",
                placed.id(),
                placed.total()
            )?;
        }
        OrderAction::List => {
            let mut all = orders.get_all()?;
            all.sort_by(|a, b| {
                a.customer_id()
                    .cmp(b.customer_id())
                    .then_with(|| a.id().cmp(b.id()))
            });
            render::orders(out, format, &all)?;
        }
        OrderAction::Show { id } => match orders.find_optional_by_id(&id)? {
            Some(o) => render::order(out, format, &o)?,
            None => writeln!(out, "Not found.")?,
        },
        OrderAction::ByCustomer { customer } => {
            let found = orders.orders_for_customer(&customer)?;
            render::orders(out, format, &found)?;
        }
        OrderAction::Reassign { id, customer } => {
            let mut o = orders.require_by_id(&id)?;
            o.set_customer_id(customer);
            let updated = orders.update(o)?;
            writeln!(
                out,
                "✓ Order {} moved to customer {}.",
                updated.id(),
                updated.customer_id()
            )?;
        }
        OrderAction::AddItem { id, product, qty } => {
            let mut o = orders.require_by_id(&id)?;
            let p = orders.products().require_by_id(&product)?;
            o.add_product(&p, qty)?;
            let updated = orders.update(o)?;
            writeln!(out, "✓ Added {} x {}.", qty, p.name())?;
            render::order(out, format, &updated)?;
        }
        OrderAction::RemoveItem { id, product, qty } => {
            let mut o = orders.require_by_id(&id)?;
            if o.quantity_of(&product) == 0 {
                writeln!(out, "This product is not in the order.")?;
                return Ok(());
            }
            let removed = o.remove_product(&product, qty);
            let updated = orders.update(o)?;
            writeln!(out, "✓ Removed {removed} item(s).")?;
            render::order(out, format, &updated)?;
        }
        OrderAction::SetQty { id, product, qty } => {
            let mut o = orders.require_by_id(&id)?;
            let p = orders.products().require_by_id(&product)?;
            o.set_quantity(&p, qty)?;
            let updated = orders.update(o)?;
            writeln!(out, "✓ Quantity set to {} for {}.", qty, p.name())?;
            render::order(out, format, &updated)?;
        }
        OrderAction::Delete { id } => {
            orders.delete(&id)?;
            writeln!(out, "✓ Deleted successfully.")?;
        }
    }
    Ok(())
}

pub fn categories<W: Write>(out: &mut W, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Category::ALL)?)?;
        }
        OutputFormat::Text => {
            for (i, category) in Category::ALL.iter().enumerate() {
                writeln!(out, "{:>2}. {}", i + 1, category)?;
            }
        }
    }
    Ok(())
}
