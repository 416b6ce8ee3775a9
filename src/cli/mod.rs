pub mod expenses;
pub mod export;
pub mod import;
pub mod init;
pub mod status;
pub mod summary;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use comfy_table::{Cell, CellAlignment, Table};

use crate::fmt;
use crate::models::Expense;
use crate::reconciler::DEFAULT_EXPORT_FILE;

#[derive(Parser)]
#[command(name = "expenses", version, about = "Track personal expenses from the command line.")]
pub struct Cli {
    /// Database file to use instead of the configured data directory
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the database.
    Init {
        /// Directory for expense data (default: ~/Documents/expenses)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record a new expense.
    Add {
        /// Amount spent, greater than zero
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Category, e.g. food, transport, bills
        category: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Free-form note
        #[arg(long, short = 'm', default_value = "")]
        description: String,
    },
    /// List every expense.
    List,
    /// Find expenses in a category (case-insensitive).
    Search {
        category: String,
    },
    /// Delete an expense by ID.
    Delete {
        /// Expense ID (shown in `expenses list`)
        id: i64,
    },
    /// Totals per category.
    Summary,
    /// Write all expenses to a JSON file.
    Export {
        /// Output path
        #[arg(long, short, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Merge expenses from a JSON file, skipping ones already recorded.
    Import {
        /// JSON file produced by `expenses export`
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,
    },
    /// Show the database location and record count.
    Status,
}

pub(crate) fn expense_table(rows: &[Expense]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Amount", "Description"]);
    for e in rows {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(e.date),
            Cell::new(&e.category),
            Cell::new(fmt::amount(e.amount)).set_alignment(CellAlignment::Right),
            Cell::new(&e.description),
        ]);
    }
    table
}
