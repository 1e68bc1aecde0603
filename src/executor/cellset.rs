//! Cellset responses and their flattening into a [`Table`].
//!
//! A cellset carries column headers (one list per column, outermost level
//! first), row headers, the names of the row fields and a sparse list of data
//! cells addressed by `(row, column)`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ExecutorError, ExecutorResult};
use super::table::Table;

/// A named header member.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeaderCell {
    pub name: String,
}

/// A row field (dimension shown on rows).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Field {
    pub name: String,
}

/// A single data cell.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub value: Value,
}

/// Query result as returned by the BI service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cellset {
    pub columns: Vec<Vec<HeaderCell>>,
    pub rows: Vec<Vec<HeaderCell>>,
    pub row_fields: Vec<Field>,
    pub data: Vec<Cell>,
}

impl Cellset {
    /// Parse a cellset from its JSON representation.
    pub fn from_json(json: &str) -> ExecutorResult<Self> {
        serde_json::from_str(json).map_err(ExecutorError::DeserializeFailed)
    }

    /// Column captions; multi-level headers are joined with `|`.
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|levels| {
                levels
                    .iter()
                    .map(|h| h.name.as_str())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect()
    }

    /// Flatten into a table: row header columns first, then the value grid.
    ///
    /// The grid always has at least one row so that a grand total without row
    /// headers still shows up.
    pub fn to_table(&self) -> ExecutorResult<Table> {
        let value_columns = self.column_names();
        let grid_rows = self.rows.len().max(1);

        let mut grid = vec![vec![Value::Null; value_columns.len()]; grid_rows];
        for cell in &self.data {
            let slot = grid
                .get_mut(cell.row)
                .and_then(|row| row.get_mut(cell.column))
                .ok_or(ExecutorError::CellOutOfRange {
                    row: cell.row,
                    column: cell.column,
                    rows: grid_rows,
                    columns: value_columns.len(),
                })?;
            *slot = cell.value.clone();
        }

        let mut columns: Vec<String> = self.row_fields.iter().map(|f| f.name.clone()).collect();
        columns.extend(value_columns);

        let rows = grid
            .into_iter()
            .enumerate()
            .map(|(i, values)| {
                let mut row: Vec<Value> = (0..self.row_fields.len())
                    .map(|j| {
                        self.rows
                            .get(i)
                            .and_then(|header| header.get(j))
                            .map_or(Value::Null, |h| Value::String(h.name.clone()))
                    })
                    .collect();
                row.extend(values);
                row
            })
            .collect();

        Ok(Table { columns, rows })
    }
}
