use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::db::DB_FILE_NAME;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::Store;

/// Save the data directory (when given) and create the database. With an
/// explicit `--db`, only that file is initialized and settings are untouched.
pub fn run(data_dir: Option<String>, explicit_db: Option<&Path>) -> Result<()> {
    let db_path = match explicit_db {
        Some(p) => p.to_path_buf(),
        None => {
            let mut settings = load_settings();
            if let Some(dir) = data_dir {
                settings.data_dir = shellexpand_path(&dir);
            }
            std::fs::create_dir_all(&settings.data_dir)?;
            save_settings(&settings)?;
            PathBuf::from(&settings.data_dir).join(DB_FILE_NAME)
        }
    };

    let store = Store::open(&db_path)?;
    println!("{}", format!("Database ready at {}", db_path.display()).green());
    println!("{} expense(s) on record", store.count()?);
    Ok(())
}
