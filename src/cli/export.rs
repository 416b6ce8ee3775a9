use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::reconciler::export_to_file;
use crate::store::Store;

pub fn run(store: &Store, output: &Path) -> Result<()> {
    let count = export_to_file(store, output)?;
    println!(
        "{}",
        format!("{count} expense(s) exported to {}", output.display()).green()
    );
    Ok(())
}
