//! # mdxgen
//!
//! Compiles structured query IR into MDX statements for an OLAP cube.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        MetadataIndex            QueryIr                  │
//! │  (dimensions, levels, measures)  (rows, cols, conds)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [planner::date]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Date fragment + placement + ordering directive       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [planner::axis]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Rows / slicer expressions (deduplicated)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    MDX Statement                         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor] (optional)
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Cellset → Table                         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod compile;
pub mod config;
pub mod executor;
pub mod ir;
pub mod mdx;
pub mod metadata;
pub mod planner;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{
        compile, compile_json, CompileError, CompileOptions, CompileOutput, CompileResult,
    };
    pub use crate::config::Settings;
    pub use crate::ir::{CondValue, Condition, Operator, OrderBy, QueryIr, Scalar};
    pub use crate::mdx::{
        // Constructors
        ancestor,
        and_all,
        cross_join,
        descendants,
        filter,
        func,
        lit_str,
        measure,
        order,
        path,
        set,
        // Types
        ComparisonOp,
        MdxExpr,
        SortDir,
        Statement,
    };
    pub use crate::metadata::{DimensionMeta, FieldKind, MetadataIndex};
    pub use crate::planner::{DatePlacement, OrderDirective, PlanError, Placement};
}

// Also export at crate root for convenience
pub use compile::{compile, CompileOptions, CompileOutput};
pub use ir::QueryIr;
pub use mdx::{MdxExpr, Statement};
pub use metadata::MetadataIndex;
