use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::reconciler::import_from_file;
use crate::store::Store;

pub fn run(store: &mut Store, file: &Path) -> Result<usize> {
    let imported = import_from_file(store, file)?;
    println!(
        "{}",
        format!("{imported} new expense(s) imported from {}", file.display()).green()
    );
    Ok(imported)
}
