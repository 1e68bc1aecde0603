//! Flat tabular results.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?%?$").expect("valid numeric pattern"));

/// A flattened query result: header names plus rows of JSON values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop rows with missing values.
    ///
    /// Cells are scanned left to right: a numeric-looking string keeps the
    /// row, a null drops it. Rows with neither are kept.
    pub fn retain_complete_rows(&mut self) {
        self.rows.retain(|row| {
            for cell in row {
                match cell {
                    Value::String(s) if NUMERIC.is_match(s) => return true,
                    Value::Null => return false,
                    _ => {}
                }
            }
            true
        });
    }

    /// Index of the column named `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
