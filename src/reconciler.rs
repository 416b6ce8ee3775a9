use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ExpenseError, Result};
use crate::models::{Expense, NewExpense};
use crate::store::Store;

pub const DEFAULT_EXPORT_FILE: &str = "expenses.json";

/// Identity used to spot an already-stored expense during import. Category is
/// compared exactly as stored, unlike search and summary.
type DuplicateKey = (u64, String, NaiveDate, String);

fn duplicate_key(e: &NewExpense) -> DuplicateKey {
    (e.amount.to_bits(), e.category.clone(), e.date, e.description.clone())
}

/// Serialize every stored expense as an indented JSON array, in id order.
pub fn export_all(store: &Store) -> Result<String> {
    let expenses = store.list_all()?;
    render(&expenses)
}

pub fn export_to_file(store: &Store, path: &Path) -> Result<usize> {
    let expenses = store.list_all()?;
    std::fs::write(path, render(&expenses)?)?;
    info!(count = expenses.len(), path = %path.display(), "exported expenses");
    Ok(expenses.len())
}

fn render(expenses: &[Expense]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    expenses.serialize(&mut ser)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e).into())
}

/// Merge a JSON document into the store, skipping records already present.
/// Returns how many were added. Nothing is written unless the whole document
/// parses and validates.
pub fn import_merge(store: &mut Store, document: &str) -> Result<usize> {
    merge_bytes(store, document.as_bytes())
}

fn merge_bytes(store: &mut Store, document: &[u8]) -> Result<usize> {
    let candidates: Vec<NewExpense> = serde_json::from_slice(document)?;
    for candidate in &candidates {
        candidate.validate()?;
    }

    let mut seen: HashSet<DuplicateKey> = store
        .list_all()?
        .iter()
        .map(|e| duplicate_key(&NewExpense::from(e)))
        .collect();

    let mut fresh = Vec::new();
    for candidate in candidates {
        if seen.insert(duplicate_key(&candidate)) {
            fresh.push(candidate);
        } else {
            debug!(category = %candidate.category, date = %candidate.date, "skipping duplicate");
        }
    }

    let added = store.insert_many(&fresh)?.len();
    info!(added, "merged expense document");
    Ok(added)
}

pub fn import_from_file(store: &mut Store, path: &Path) -> Result<usize> {
    let document = match std::fs::read(path) {
        Ok(doc) => doc,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ExpenseError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    merge_bytes(store, &document)
}
