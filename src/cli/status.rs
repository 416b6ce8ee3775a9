use std::path::Path;

use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;
use crate::store::Store;

pub fn run(db_path: &Path) -> Result<()> {
    let settings = load_settings();
    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let store = Store::open(db_path)?;
        let categories = store.summarize()?.len();
        println!();
        println!("Expenses:   {}", store.count()?);
        println!("Categories: {categories}");
    } else {
        println!();
        println!("Database not found. Run `expenses init` to set up.");
    }
    Ok(())
}
