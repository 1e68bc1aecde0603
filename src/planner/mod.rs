//! MDX query planner - converts a QueryIr into row, slicer and ordering plans.
//!
//! Two passes, sharing one [`UsedDimensions`] accumulator:
//! 1. Conditions: date conditions are resolved together ([`date`]), the rest
//!    become member restrictions.
//! 2. Rows: axis dimensions left untouched are enumerated in full.

pub mod axis;
pub mod date;
pub mod order;

pub use axis::{build_axes, AxisBuilder, AxisPlan, DatePlacement, UsedDimensions};
pub use date::{classify, resolve, DatePlan, DateResolution, DateShape, LevelRef, Placement};
pub use order::{OrderDirective, Ordering};

use crate::ir::{Operator, QueryIr};
use crate::metadata::{DimensionMeta, MetadataIndex};
use thiserror::Error;

/// Errors that can occur during planning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Unknown identifier: '{id}'")]
    UnknownIdentifier { id: String },

    #[error("Empty member list in condition on '{id}'")]
    EmptyMemberList { id: String },

    #[error("Comparison '{op}' on '{id}' requires a time dimension")]
    ComparisonOnNonTime { id: String, op: Operator },
}

pub type PlanResult<T> = Result<T, PlanError>;

/// Resolve an identifier or fail.
pub fn lookup<'i>(index: &'i MetadataIndex, id: &str) -> PlanResult<&'i DimensionMeta> {
    index
        .get(id)
        .ok_or_else(|| PlanError::UnknownIdentifier { id: id.to_string() })
}

/// Main entry point for axis planning.
pub struct MdxPlanner<'a> {
    index: &'a MetadataIndex,
    policy: DatePlacement,
}

impl<'a> MdxPlanner<'a> {
    /// Create a planner over the given metadata index.
    pub fn new(index: &'a MetadataIndex) -> Self {
        Self {
            index,
            policy: DatePlacement::default(),
        }
    }

    pub fn with_date_placement(mut self, policy: DatePlacement) -> Self {
        self.policy = policy;
        self
    }

    /// Plan the rows and slicer of `ir`.
    pub fn plan(&self, ir: &QueryIr) -> PlanResult<AxisPlan> {
        build_axes(self.index, ir, self.policy)
    }
}
