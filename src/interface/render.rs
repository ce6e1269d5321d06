use std::collections::BTreeMap;

use crate::models::Projection;
use crate::table::KeyedTable;

/// Format a metric, with `-` for unavailable values.
fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn fmt_option(value: Option<f64>) -> String {
    fmt_value(value.unwrap_or(f64::NAN))
}

/// Display an aggregate table with aligned columns.
pub fn display_table(table: &KeyedTable, title: &str) {
    if table.is_empty() {
        println!("{}: (no rows)", title);
        return;
    }

    let cells: Vec<Vec<String>> = table
        .iter_rows()
        .map(|row| row.iter().map(|(_, v)| fmt_value(v)).collect())
        .collect();

    let label_width = table.rows().iter().map(|r| r.len()).max().unwrap_or(0);
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .max()
                .unwrap_or(0)
                .max(column.len())
        })
        .collect();

    println!();
    println!("=== {} ({} rows) ===", title, table.len());
    println!();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:>width$}", column, width = width))
        .collect();
    println!("{:<width$}  {}", "", header.join("  "), width = label_width);

    for (label, row) in table.rows().iter().zip(&cells) {
        let values: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:>width$}", value, width = width))
            .collect();
        println!("{:<width$}  {}", label, values.join("  "), width = label_width);
    }
    println!();
}

/// Display gross resource requirements.
pub fn display_requirements(item: &str, amount: u64, requirements: &BTreeMap<String, Option<u64>>) {
    println!();
    println!("=== Resources for {} x {} ===", amount, item);
    for (resource, needed) in requirements {
        match needed {
            Some(units) => println!("  {:<24} {}", resource, units),
            None => println!("  {:<24} unavailable", resource),
        }
    }
    println!();
}

/// Display a projection to a target craft count.
pub fn display_projection(projection: &Projection) {
    let item = format!("{} {}.{}", projection.item, projection.tier, projection.ench);
    display_requirements(&item, projection.amount, &projection.resources);

    println!("--- Totals ---");
    println!("Cost price: {}", fmt_option(projection.total_cost));
    println!("Fame: {}", fmt_value(projection.total_fame));
    println!("Focus: {}", fmt_option(projection.total_focus));
    println!("Profit: {}", fmt_option(projection.total_profit));
    println!();
}
