use colored::Colorize;

use super::expense_table;
use crate::error::Result;
use crate::fmt;
use crate::models::{NewExpense, DATE_FORMAT};
use crate::store::Store;

pub fn add(
    store: &mut Store,
    amount: f64,
    category: &str,
    date: Option<&str>,
    description: &str,
) -> Result<i64> {
    let today;
    let date: &str = match date {
        Some(d) => d,
        None => {
            today = chrono::Local::now().date_naive().format(DATE_FORMAT).to_string();
            &today
        }
    };
    let expense = NewExpense::parse(amount, category, date, description)?;
    let id = store.insert(&expense)?;
    println!("{}", format!("Expense {id} added.").green());
    Ok(id)
}

pub fn list(store: &Store) -> Result<()> {
    let rows = store.list_all()?;
    if rows.is_empty() {
        println!("{}", "No expenses recorded.".yellow());
        return Ok(());
    }
    let total: f64 = rows.iter().map(|e| e.amount).sum();
    println!("Expenses\n{}", expense_table(&rows));
    println!("{} expense(s), total {}", rows.len(), fmt::amount(total).bold());
    Ok(())
}

pub fn search(store: &Store, category: &str) -> Result<()> {
    let rows = store.search_by_category(category)?;
    if rows.is_empty() {
        println!("{}", "No expenses found for this category.".red());
        return Ok(());
    }
    println!("Search results\n{}", expense_table(&rows));
    Ok(())
}

pub fn delete(store: &mut Store, id: i64) -> Result<()> {
    if store.delete(id)? {
        println!("{}", format!("Expense {id} deleted.").red());
    } else {
        println!("{}", format!("No expense with ID {id}; nothing deleted.").yellow());
    }
    Ok(())
}
