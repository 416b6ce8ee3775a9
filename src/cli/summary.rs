use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;
use crate::fmt;
use crate::store::Store;

pub fn run(store: &Store) -> Result<()> {
    let totals = store.summarize()?;
    if totals.is_empty() {
        println!("{}", "No expenses found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Total"]);
    for (category, total) in &totals {
        table.add_row(vec![
            Cell::new(category),
            Cell::new(fmt::amount(*total)).set_alignment(CellAlignment::Right),
        ]);
    }
    let grand: f64 = totals.values().sum();
    table.add_row(vec![
        Cell::new("TOTAL"),
        Cell::new(fmt::amount(grand)).set_alignment(CellAlignment::Right),
    ]);
    println!("Expense summary\n{table}");
    Ok(())
}
