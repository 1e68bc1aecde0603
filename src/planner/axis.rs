//! Axis and condition assignment.
//!
//! Every condition ends up as a row restriction (or, for slicer-placed date
//! fragments, a slicer entry). Axis dimensions that no condition narrowed are
//! enumerated in full. [`UsedDimensions`] guarantees that an identifier is
//! emitted at most once per compilation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::date::{self, Placement};
use super::order::OrderDirective;
use super::{lookup, PlanError, PlanResult};
use crate::ir::{CondValue, QueryIr};
use crate::mdx::{path, set, MdxExpr};
use crate::metadata::MetadataIndex;

/// Where date fragments go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePlacement {
    /// Always restrict the row axis.
    #[default]
    Rows,
    /// Follow the resolver: slicer-placed fragments go to `WHERE`.
    Resolver,
}

/// Identifiers already consumed during one compilation, in first-use order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsedDimensions {
    ids: Vec<String>,
}

impl UsedDimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` used; marking twice is a no-op.
    pub fn mark(&mut self, id: &str) {
        if !self.contains(id) {
            self.ids.push(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|used| used == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids
    }
}

/// Output of the axis builder.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPlan {
    pub rows: Vec<MdxExpr>,
    pub slicer: Vec<MdxExpr>,
    pub used: UsedDimensions,
    pub ordering: OrderDirective,
    /// Resolver placement of the date fragment, if one was produced.
    pub date_placement: Option<Placement>,
}

/// Builds the row and slicer expression lists for one query.
pub struct AxisBuilder<'a> {
    index: &'a MetadataIndex,
    ir: &'a QueryIr,
    policy: DatePlacement,
    rows: Vec<MdxExpr>,
    slicer: Vec<MdxExpr>,
    used: UsedDimensions,
    ordering: OrderDirective,
    date_placement: Option<Placement>,
}

impl<'a> AxisBuilder<'a> {
    pub fn new(index: &'a MetadataIndex, ir: &'a QueryIr, policy: DatePlacement) -> Self {
        Self {
            index,
            ir,
            policy,
            rows: vec![],
            slicer: vec![],
            used: UsedDimensions::new(),
            ordering: OrderDirective::KeepOriginal,
            date_placement: None,
        }
    }

    /// Resolve date conditions, then turn every remaining condition into a
    /// member restriction on the row axis.
    pub fn build_condition(&mut self) -> PlanResult<&mut Self> {
        let resolved = date::resolve(self.index, self.ir)?;
        for id in &resolved.consumed {
            self.used.mark(id);
        }
        self.ordering = std::mem::take(&mut self.ordering).then(resolved.ordering);

        if let Some(fragment) = resolved.fragment {
            self.date_placement = Some(resolved.placement);
            match (self.policy, resolved.placement) {
                (DatePlacement::Resolver, Placement::Slicer) => self.slicer.push(fragment),
                _ => self.rows.push(fragment),
            }
        }

        let ir = self.ir;
        for cond in &ir.conds {
            if self.used.contains(&cond.id) {
                continue;
            }
            let meta = lookup(self.index, &cond.id)?;
            if cond.op.is_range() && !cond.is_multi_select() {
                return Err(PlanError::ComparisonOnNonTime {
                    id: cond.id.clone(),
                    op: cond.op,
                });
            }

            let (dim, level) = meta.member_scope();
            let restriction = match &cond.value {
                CondValue::List(values) => {
                    if values.is_empty() {
                        return Err(PlanError::EmptyMemberList {
                            id: cond.id.clone(),
                        });
                    }
                    set(values
                        .iter()
                        .map(|v| path([dim.to_string(), level.to_string(), v.to_string()]))
                        .collect())
                }
                CondValue::Scalar(v) => path([dim.to_string(), level.to_string(), v.to_string()]),
            };
            self.rows.push(restriction);
            self.used.mark(&cond.id);
        }

        Ok(self)
    }

    /// Enumerate every unused axis dimension in full.
    pub fn build_row(&mut self) -> PlanResult<&mut Self> {
        let ir = self.ir;
        for id in ir.row_and_col() {
            if self.used.contains(id) {
                continue;
            }
            let meta = lookup(self.index, id)?;
            if meta.is_measure() {
                debug!(id, "measure on a dimension axis left to the column set");
                self.used.mark(id);
                continue;
            }
            self.rows
                .push(path([meta.name.as_str(), meta.name.as_str()]).members());
            self.used.mark(id);
        }
        Ok(self)
    }

    pub fn finish(self) -> AxisPlan {
        AxisPlan {
            rows: self.rows,
            slicer: self.slicer,
            used: self.used,
            ordering: self.ordering,
            date_placement: self.date_placement,
        }
    }
}

/// Run both passes with the given date placement policy.
pub fn build_axes(
    index: &MetadataIndex,
    ir: &QueryIr,
    policy: DatePlacement,
) -> PlanResult<AxisPlan> {
    let mut builder = AxisBuilder::new(index, ir, policy);
    builder.build_condition()?.build_row()?;
    Ok(builder.finish())
}
