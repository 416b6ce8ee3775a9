use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Invalid expense: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("No such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read expense document: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
