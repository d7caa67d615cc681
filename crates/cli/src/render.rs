//! Terminal rendering for items, carts and orders.

use std::{io, ops::Range};

use rust_decimal::Decimal;
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use randostore::{
    cart::Cart,
    checkout::{OrderSummary, tax_rate},
    items::Item,
    prices::format_amount,
};

/// Builds the table, right-aligning the numeric `columns`.
fn finish_table(builder: Builder, columns: Range<usize>) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(columns), Alignment::right());

    table
}

/// Writes the catalog as a table.
pub(crate) fn write_items(out: &mut dyn io::Write, items: &[Item]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No items for sale.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Price", "Image"]);

    for item in items {
        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            item.price.to_money().to_string(),
            item.img.clone().unwrap_or_default(),
        ]);
    }

    writeln!(out, "{}", finish_table(builder, 2..3))
}

/// Writes a single item as labelled lines.
pub(crate) fn write_item(out: &mut dyn io::Write, item: &Item) -> io::Result<()> {
    writeln!(out, "Id:    {}", item.id)?;
    writeln!(out, "Name:  {}", item.name)?;
    writeln!(out, "Price: {}", item.price.to_money())?;
    writeln!(out, "Image: {}", item.img.as_deref().unwrap_or("-"))
}

/// Writes the cart lines and totals.
pub(crate) fn write_cart(out: &mut dyn io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Qty", "Price", "Line Total"]);

    for line in cart.iter() {
        builder.push_record([
            line.item().id.to_string(),
            line.item().name.clone(),
            line.quantity().to_string(),
            line.item().price.to_money().to_string(),
            format_amount(line.line_total()),
        ]);
    }

    writeln!(out, "{}", finish_table(builder, 2..5))?;
    writeln!(out, "Items: {}", cart.total_items())?;
    writeln!(out, "Total: {}", cart.total_money())
}

/// Writes the priced order breakdown.
pub(crate) fn write_summary(out: &mut dyn io::Write, summary: &OrderSummary) -> io::Result<()> {
    let tax_percent = (tax_rate() * Decimal::ONE_HUNDRED).normalize();

    let shipping = if summary.free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping_money().to_string()
    };

    let rows = [
        ("Items".to_string(), summary.items.to_string()),
        ("Subtotal".to_string(), summary.subtotal_money().to_string()),
        (format!("Tax ({tax_percent}%)"), summary.tax_money().to_string()),
        ("Shipping".to_string(), shipping),
        ("Total".to_string(), summary.total_money().to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, "{label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}
