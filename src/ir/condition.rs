//! Filter conditions: `(id, operator, value)` triples.

use std::fmt;

use serde::Deserialize;

use super::IrError;
use crate::mdx::ComparisonOp;

/// Condition operator.
///
/// Equality-like spellings (`=`, `==`, `eq`, `in`) collapse into
/// [`Operator::Eq`]; anything outside the two families is rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Operator {
    /// Comparison family (`>`, `<`, `>=`, `<=`).
    pub fn is_range(self) -> bool {
        !matches!(self, Operator::Eq)
    }

    pub fn as_comparison(self) -> ComparisonOp {
        match self {
            Operator::Eq => ComparisonOp::Eq,
            Operator::Gt => ComparisonOp::Gt,
            Operator::Lt => ComparisonOp::Lt,
            Operator::Gte => ComparisonOp::Gte,
            Operator::Lte => ComparisonOp::Lte,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
        }
    }
}

impl std::str::FromStr for Operator {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" | "in" => Ok(Operator::Eq),
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            ">=" => Ok(Operator::Gte),
            "<=" => Ok(Operator::Lte),
            _ => Err(IrError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = IrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single condition value as it appears in a member name or caption.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => {
                let mut buffer = ryu::Buffer::new();
                f.write_str(buffer.format(*x))
            }
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.into())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

/// Scalar or multi-select membership list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CondValue {
    List(Vec<Scalar>),
    Scalar(Scalar),
}

/// A filter condition.
///
/// Deserializes from either `[id, op, value]` or `{"id", "op", "value"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub id: String,
    #[serde(alias = "operator")]
    pub op: Operator,
    pub value: CondValue,
}

impl Condition {
    pub fn new(id: &str, op: Operator, value: CondValue) -> Self {
        Self {
            id: id.into(),
            op,
            value,
        }
    }

    /// `id = value`
    pub fn eq(id: &str, value: impl Into<Scalar>) -> Self {
        Self::new(id, Operator::Eq, CondValue::Scalar(value.into()))
    }

    /// `id in [values...]`
    pub fn one_of<I, V>(id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self::new(
            id,
            Operator::Eq,
            CondValue::List(values.into_iter().map(Into::into).collect()),
        )
    }

    /// `id op value` for a comparison operator.
    pub fn compare(id: &str, op: Operator, value: impl Into<Scalar>) -> Self {
        Self::new(id, op, CondValue::Scalar(value.into()))
    }

    pub fn is_multi_select(&self) -> bool {
        matches!(self.value, CondValue::List(_))
    }
}
