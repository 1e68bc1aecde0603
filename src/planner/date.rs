//! Date condition resolution.
//!
//! Conditions on time-bearing dimensions are handled together, in two pure
//! steps:
//!
//! 1. [`classify`] decides the placement (slicer or axis), whether the axis
//!    already shows a different time level (named set), and the shape of the
//!    filter: multi-select, range or discrete members.
//! 2. [`DatePlan::render`] turns that decision into an MDX fragment and an
//!    [`OrderDirective`].
//!
//! ```text
//! multi-select  order({[Date].[Month].[2023-01],...}, ([Date].currentMember.caption), BASC)
//! range         filter([Date].[Month].Members, (Ancestor(...).caption > '2023-01') and (...))
//! discrete      {[Date].[Year].[2023]}
//! named set     Descendants(<fragment>, [Date].[Month])
//! ```

use tracing::{debug, warn};

use super::order::{OrderDirective, Ordering};
use super::{PlanError, PlanResult};
use crate::ir::{CondValue, Condition, QueryIr};
use crate::mdx::{
    ancestor, and_all, descendants, filter, lit_str, order, path, set, ComparisonOp, MdxExpr,
    SortDir,
};
use crate::metadata::{DimensionMeta, MetadataIndex};

/// Where a resolved date fragment belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Not displayed on any axis; restricts the whole result.
    Slicer,
    /// A time dimension is displayed; restrict that axis.
    Axis,
}

/// A time level addressed as `[object].[name]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRef {
    pub object: String,
    pub name: String,
}

impl LevelRef {
    pub fn of(meta: &DimensionMeta) -> Self {
        Self {
            object: meta.object_name.clone(),
            name: meta.name.clone(),
        }
    }

    /// `[object].[name]`
    pub fn path(&self) -> MdxExpr {
        path([self.object.as_str(), self.name.as_str()])
    }

    /// `[object].[name].[value]`
    pub fn member(&self, value: &str) -> MdxExpr {
        path([self.object.as_str(), self.name.as_str(), value])
    }

    /// `[object]`
    pub fn hierarchy(&self) -> MdxExpr {
        path([self.object.as_str()])
    }
}

/// One side of a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBound {
    pub level: LevelRef,
    pub op: ComparisonOp,
    pub value: String,
}

/// How the date conditions restrict the time dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum DateShape {
    /// Explicit member list from the first multi-select condition.
    MultiSelect { level: LevelRef, members: Vec<String> },
    /// Caption comparisons over the members of `level`.
    Range { level: LevelRef, bounds: Vec<RangeBound> },
    /// Single members from equality conditions.
    Discrete { members: Vec<(LevelRef, String)> },
}

/// Result of the classification step.
#[derive(Debug, Clone, PartialEq)]
pub struct DatePlan {
    pub placement: Placement,
    /// Identifiers handled here, to be marked used by the caller.
    pub consumed: Vec<String>,
    /// `None` when the query has no date conditions.
    pub shape: Option<DateShape>,
    /// Level shown on the axis when it differs from every filtered level.
    pub named_set: Option<LevelRef>,
}

/// Result of the rendering step.
#[derive(Debug, Clone, PartialEq)]
pub struct DateResolution {
    pub fragment: Option<MdxExpr>,
    pub placement: Placement,
    pub ordering: OrderDirective,
    pub consumed: Vec<String>,
}

/// Classify and render the date conditions of `ir`.
pub fn resolve(index: &MetadataIndex, ir: &QueryIr) -> PlanResult<DateResolution> {
    Ok(classify(index, ir)?.render())
}

/// Classify the date conditions of `ir` without rendering anything.
pub fn classify(index: &MetadataIndex, ir: &QueryIr) -> PlanResult<DatePlan> {
    let has_date_on_axis = ir.row_and_col().any(|id| index.is_time(id));

    let mut placement = Placement::Slicer;
    let mut consumed = Vec::new();
    let mut date_conds: Vec<(&Condition, &DimensionMeta)> = Vec::new();

    for cond in &ir.conds {
        let Some(meta) = index.get(&cond.id).filter(|m| m.is_time()) else {
            continue;
        };
        placement = if ir.on_axis(&cond.id) || has_date_on_axis {
            Placement::Axis
        } else {
            Placement::Slicer
        };
        date_conds.push((cond, meta));
        consumed.push(cond.id.clone());
    }

    if date_conds.is_empty() {
        return Ok(DatePlan {
            placement,
            consumed,
            shape: None,
            named_set: None,
        });
    }

    // The first time level on an axis decides whether descendants are needed;
    // every time level on an axis is covered by the date fragment.
    let axis_time_ids: Vec<&str> = ir.row_and_col().filter(|id| index.is_time(id)).collect();
    consumed.extend(axis_time_ids.iter().map(|id| id.to_string()));

    let named_set = match axis_time_ids.first() {
        Some(min_id) if !date_conds.iter().any(|(cond, _)| cond.id == *min_id) => {
            index.get(min_id).map(LevelRef::of)
        }
        _ => None,
    };

    let shape = classify_shape(&date_conds)?;

    debug!(
        conditions = date_conds.len(),
        ?placement,
        named_set = named_set.is_some(),
        shape = shape_name(&shape),
        "classified date conditions"
    );

    Ok(DatePlan {
        placement,
        consumed,
        shape: Some(shape),
        named_set,
    })
}

fn classify_shape(date_conds: &[(&Condition, &DimensionMeta)]) -> PlanResult<DateShape> {
    let multi_select = date_conds.iter().find_map(|(cond, meta)| match &cond.value {
        CondValue::List(values) => Some((cond.id.as_str(), *meta, values)),
        CondValue::Scalar(_) => None,
    });

    if let Some((id, meta, values)) = multi_select {
        if values.is_empty() {
            return Err(PlanError::EmptyMemberList { id: id.to_string() });
        }
        return Ok(DateShape::MultiSelect {
            level: LevelRef::of(meta),
            members: values.iter().map(ToString::to_string).collect(),
        });
    }

    let mut bounds = Vec::new();
    let mut members = Vec::new();
    for (cond, meta) in date_conds {
        let CondValue::Scalar(value) = &cond.value else {
            continue;
        };
        if cond.op.is_range() {
            bounds.push(RangeBound {
                level: LevelRef::of(meta),
                op: cond.op.as_comparison(),
                value: value.to_string(),
            });
        } else {
            members.push((LevelRef::of(meta), value.to_string()));
        }
    }

    if let Some(last) = bounds.last() {
        if !members.is_empty() {
            warn!(
                dropped = members.len(),
                "discrete date members ignored alongside a range filter"
            );
        }
        return Ok(DateShape::Range {
            level: last.level.clone(),
            bounds,
        });
    }

    Ok(DateShape::Discrete { members })
}

fn shape_name(shape: &DateShape) -> &'static str {
    match shape {
        DateShape::MultiSelect { .. } => "multi_select",
        DateShape::Range { .. } => "range",
        DateShape::Discrete { .. } => "discrete",
    }
}

impl DatePlan {
    /// Render the plan into an MDX fragment and an ordering directive.
    pub fn render(self) -> DateResolution {
        let placement = self.placement;
        let consumed = self.consumed;

        let Some(shape) = self.shape else {
            return DateResolution {
                fragment: None,
                placement,
                ordering: OrderDirective::KeepOriginal,
                consumed,
            };
        };

        let (fragment, ordering) = match shape {
            DateShape::MultiSelect { level, members } => {
                // Multi-select carries its own ordering and is never wrapped again.
                let mut members_set = set(members.iter().map(|m| level.member(m)).collect());
                if self.named_set.is_some() {
                    members_set = descendants(members_set, level.path());
                }
                let key = level.hierarchy().current_member().caption().paren();
                let fragment = order(members_set, key.clone(), SortDir::Asc);
                return DateResolution {
                    fragment: Some(fragment),
                    placement,
                    ordering: OrderDirective::Overridden(Ordering {
                        key,
                        dir: SortDir::Asc,
                    }),
                    consumed,
                };
            }

            DateShape::Range { level, bounds } => {
                let predicates = bounds
                    .into_iter()
                    .map(|bound| {
                        ancestor(bound.level.hierarchy().current_member(), bound.level.path())
                            .caption()
                            .compare(bound.op, lit_str(bound.value))
                            .paren()
                    })
                    .collect();
                (
                    filter(level.path().members(), and_all(predicates)),
                    OrderDirective::Suppressed,
                )
            }

            DateShape::Discrete { members } => (
                set(members
                    .iter()
                    .map(|(level, value)| level.member(value))
                    .collect()),
                OrderDirective::KeepOriginal,
            ),
        };

        let (fragment, ordering) = match self.named_set {
            Some(named) => (
                descendants(fragment, named.path()),
                ordering.then(OrderDirective::Suppressed),
            ),
            None => (fragment, ordering),
        };

        DateResolution {
            fragment: Some(fragment),
            placement,
            ordering,
            consumed,
        }
    }
}
