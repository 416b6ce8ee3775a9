use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ExpenseError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored ledger entry. Field order here is the key order of exported JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// An expense that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl NewExpense {
    /// Build a validated expense from raw caller input.
    pub fn parse(amount: f64, category: &str, date: &str, description: &str) -> Result<Self> {
        let date = parse_date(date)?;
        let expense = Self {
            amount,
            category: category.to_string(),
            date,
            description: description.to_string(),
        };
        expense.validate()?;
        Ok(expense)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseError::Validation(format!(
                "amount must be greater than zero, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseError::Validation("category must not be empty".to_string()));
        }
        Ok(())
    }
}

impl From<&Expense> for NewExpense {
    fn from(e: &Expense) -> Self {
        Self {
            amount: e.amount,
            category: e.category.clone(),
            date: e.date,
            description: e.description.clone(),
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ExpenseError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD"))
    })
}

/// Lowercase form used for every category comparison except import dedup.
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_valid_input() {
        let e = NewExpense::parse(12.5, "food", "2024-03-01", "lunch").unwrap();
        assert_eq!(e.amount, 12.5);
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(e.description, "lunch");
    }

    #[test]
    fn test_parse_rejects_non_positive_amounts() {
        assert!(matches!(
            NewExpense::parse(0.0, "food", "2024-01-01", ""),
            Err(ExpenseError::Validation(_))
        ));
        assert!(matches!(
            NewExpense::parse(-5.0, "food", "2024-01-01", ""),
            Err(ExpenseError::Validation(_))
        ));
        assert!(NewExpense::parse(f64::NAN, "food", "2024-01-01", "").is_err());
        assert!(NewExpense::parse(f64::INFINITY, "food", "2024-01-01", "").is_err());
    }

    #[test]
    fn test_parse_rejects_blank_category() {
        assert!(NewExpense::parse(1.0, "", "2024-01-01", "").is_err());
        assert!(NewExpense::parse(1.0, "   ", "2024-01-01", "").is_err());
    }

    #[test]
    fn test_parse_date_rejects_invalid_dates() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2024-02-30").is_err()); // Feb 30
        assert!(parse_date("2024-13-01").is_err()); // month 13
        assert!(parse_date("03/01/2024").is_err());
        assert_eq!(parse_date(" 2024-02-29 ").unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn test_normalize_category_preserves_input() {
        let original = "Groceries";
        assert_eq!(normalize_category(original), "groceries");
        assert_eq!(original, "Groceries");
    }

    #[test]
    fn test_description_null_or_missing_is_empty() {
        let json = r#"{"amount": 3.0, "category": "x", "date": "2024-01-01", "description": null}"#;
        let e: NewExpense = serde_json::from_str(json).unwrap();
        assert_eq!(e.description, "");
        let json = r#"{"amount": 3.0, "category": "x", "date": "2024-01-01"}"#;
        let e: NewExpense = serde_json::from_str(json).unwrap();
        assert_eq!(e.description, "");
    }
}
