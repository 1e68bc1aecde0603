//! End-to-end compilation from query IR to MDX.
//!
//! ```text
//! MetadataIndex + QueryIr → Plan axes (dates, conditions, rows) → Statement → MDX
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mdxgen::compile::{compile, CompileOptions};
//! use mdxgen::ir::QueryIr;
//! use mdxgen::metadata::{DimensionMeta, MetadataIndex};
//!
//! let index = MetadataIndex::new()
//!     .with(DimensionMeta::measure("m1", "Sales"))
//!     .with(DimensionMeta::dimension("d1", "Region"));
//! let ir = QueryIr::new().with_measure(["m1"]).with_row(["d1"]);
//!
//! let output = compile(&index, &ir, &CompileOptions::default())?;
//! println!("{}", output.mdx);
//! ```

use tracing::debug;

use crate::config::CompilerSettings;
use crate::ir::{IrError, OrderBy, QueryIr};
use crate::mdx::{measure, Statement};
use crate::metadata::{LoadError, MetadataIndex};
use crate::planner::{DatePlacement, MdxPlanner, OrderDirective, PlanError, Placement};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] LoadError),

    #[error("Query error: {0}")]
    Query(#[from] IrError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Cube named in the FROM clause.
    pub cube: String,

    /// Where date fragments go.
    pub date_placement: DatePlacement,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            cube: "cube".to_string(),
            date_placement: DatePlacement::Rows,
        }
    }
}

impl CompileOptions {
    pub fn from_settings(settings: &CompilerSettings) -> Self {
        Self {
            cube: settings.cube.clone(),
            date_placement: settings.date_placement,
        }
    }

    /// Set the cube name.
    pub fn with_cube(mut self, cube: &str) -> Self {
        self.cube = cube.to_string();
        self
    }

    /// Set the date placement policy.
    pub fn with_date_placement(mut self, date_placement: DatePlacement) -> Self {
        self.date_placement = date_placement;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of compiling a query to MDX.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutput {
    /// The generated MDX string.
    pub mdx: String,

    /// The statement AST.
    pub statement: Statement,

    /// Ordering hint after date resolution; `None` once suppressed.
    pub order_by: Option<OrderBy>,

    /// What date resolution did to the ordering hint.
    pub ordering: OrderDirective,

    /// Resolver placement of the date fragment, if there was one.
    pub date_placement: Option<Placement>,

    /// Identifiers consumed, in first-use order.
    pub used: Vec<String>,
}

// ============================================================================
// Compilation Functions
// ============================================================================

/// Compile a query IR into an MDX statement.
///
/// The IR is only borrowed; ordering changes are reported on the output.
pub fn compile(
    index: &MetadataIndex,
    ir: &QueryIr,
    options: &CompileOptions,
) -> CompileResult<CompileOutput> {
    // Measures missing from the index are dropped, not reported.
    let columns: Vec<_> = ir
        .measure
        .iter()
        .filter_map(|id| match index.get(id) {
            Some(meta) => Some(measure(&meta.name)),
            None => {
                debug!(id = id.as_str(), "dropping unknown measure");
                None
            }
        })
        .collect();

    let plan = MdxPlanner::new(index)
        .with_date_placement(options.date_placement)
        .plan(ir)?;

    let statement = Statement::new(&options.cube)
        .with_columns(columns)
        .with_rows(plan.rows)
        .with_slicer(plan.slicer);
    let mdx = statement.to_mdx();

    debug!(mdx = mdx.as_str(), "compiled statement");

    Ok(CompileOutput {
        mdx,
        statement,
        order_by: plan.ordering.apply(ir.order_by.as_ref()),
        ordering: plan.ordering,
        date_placement: plan.date_placement,
        used: plan.used.into_vec(),
    })
}

/// Compile from the JSON documents produced by the BI service.
pub fn compile_json(
    metadata_json: &str,
    query_json: &str,
    options: &CompileOptions,
) -> CompileResult<CompileOutput> {
    let index = MetadataIndex::from_json(metadata_json)?;
    let ir = QueryIr::from_json(query_json)?;
    compile(&index, &ir, options)
}
