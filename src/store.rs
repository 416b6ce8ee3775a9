use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, Row};
use tracing::debug;

use crate::db::{get_connection, get_memory_connection, init_db};
use crate::error::Result;
use crate::models::{normalize_category, Expense, NewExpense};

const SELECT_COLUMNS: &str = "SELECT id, amount, category, date, description FROM expenses";

/// Owns the expense table and the connection to it. Open one per process and
/// pass it by reference.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        let store = Self { conn };
        store.initialize()?;
        debug!(path = %db_path.display(), "opened expense store");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: get_memory_connection()?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Create the schema if missing. Safe to call any number of times.
    pub fn initialize(&self) -> Result<()> {
        init_db(&self.conn)
    }

    pub fn insert(&mut self, expense: &NewExpense) -> Result<i64> {
        expense.validate()?;
        let id = insert_row(&self.conn, expense)?;
        debug!(id, category = %expense.category, amount = expense.amount, "inserted expense");
        Ok(id)
    }

    /// Insert every expense or none of them.
    pub fn insert_many(&mut self, expenses: &[NewExpense]) -> Result<Vec<i64>> {
        for expense in expenses {
            expense.validate()?;
        }
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(expenses.len());
        for expense in expenses {
            ids.push(insert_row(&tx, expense)?);
        }
        tx.commit()?;
        debug!(count = ids.len(), "inserted expense batch");
        Ok(ids)
    }

    pub fn list_all(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt
            .query_map([], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn search_by_category(&self, category: &str) -> Result<Vec<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE fold_case(category) = ?1 ORDER BY id"))?;
        let rows = stmt
            .query_map([normalize_category(category)], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Returns whether a row was removed. A missing id is not an error.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
        debug!(id, removed, "delete expense");
        Ok(removed > 0)
    }

    /// Total amount per lowercased category.
    pub fn summarize(&self) -> Result<BTreeMap<String, f64>> {
        let mut stmt = self.conn.prepare(
            "SELECT fold_case(category) AS cat, SUM(amount) FROM expenses GROUP BY cat",
        )?;
        let totals = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;
        Ok(totals)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT count(*) FROM expenses", [], |r| r.get(0))?;
        Ok(n as usize)
    }
}

fn insert_row(conn: &Connection, expense: &NewExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses (amount, category, date, description) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![expense.amount, expense.category, expense.date, expense.description],
    )?;
    Ok(conn.last_insert_rowid())
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        date: row.get(3)?,
        description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}
