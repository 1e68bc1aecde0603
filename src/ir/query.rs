//! The structured query handed to the compiler.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::condition::Condition;
use super::{IrError, IrResult};
use crate::mdx::SortDir;

/// Ordering hint: sort by `column` in `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub dir: SortDir,
}

impl OrderBy {
    pub fn new(column: &str, dir: SortDir) -> Self {
        Self {
            column: column.into(),
            dir,
        }
    }

    /// Descending when `direction` mentions `DESC`, ascending otherwise.
    pub fn parse_dir(direction: &str) -> SortDir {
        if direction.contains("DESC") {
            SortDir::Desc
        } else {
            SortDir::Asc
        }
    }
}

/// Query IR: measures, axis dimensions, conditions and an ordering hint.
///
/// The compiler borrows the IR immutably; any change to the ordering is
/// reported on the compile output instead of written back here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryIr {
    #[serde(default)]
    pub row: Vec<String>,
    #[serde(default)]
    pub col: Vec<String>,
    #[serde(default)]
    pub measure: Vec<String>,
    #[serde(default)]
    pub conds: Vec<Condition>,
    #[serde(default, alias = "orderBy", deserialize_with = "deserialize_order_by")]
    pub order_by: Option<OrderBy>,
}

impl QueryIr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> IrResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IrError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_row<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.row = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_col<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.col = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_measure<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measure = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cond(mut self, cond: Condition) -> Self {
        self.conds.push(cond);
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Row identifiers followed by col identifiers.
    pub fn row_and_col(&self) -> impl Iterator<Item = &str> {
        self.row.iter().chain(self.col.iter()).map(String::as_str)
    }

    pub fn on_axis(&self, id: &str) -> bool {
        self.row_and_col().any(|axis_id| axis_id == id)
    }
}

/// Ordering hints arrive either as `[[..., direction, column], ...]` (only the
/// last entry counts) or as `{"column": ..., "direction": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrderBy {
    Entries(Vec<Vec<String>>),
    Single {
        column: String,
        #[serde(default)]
        direction: String,
    },
}

fn deserialize_order_by<'de, D>(deserializer: D) -> Result<Option<OrderBy>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawOrderBy>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawOrderBy::Entries(entries)) => entries.last().and_then(|entry| {
            let column = entry.last()?;
            let dir = if entry.iter().any(|part| part.contains("DESC")) {
                SortDir::Desc
            } else {
                SortDir::Asc
            };
            Some(OrderBy::new(column, dir))
        }),
        Some(RawOrderBy::Single { column, direction }) => Some(OrderBy {
            dir: OrderBy::parse_dir(&direction),
            column,
        }),
    })
}
