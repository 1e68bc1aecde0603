//! MDX generation module.
//!
//! A small, type-safe builder for the subset of MDX the compiler emits:
//!
//! - [`token`] - Token types and the serializer
//! - [`expr`] - Set/member expression AST and constructors
//! - [`statement`] - SELECT statement with column, row and slicer axes

pub mod expr;
pub mod statement;
pub mod token;

pub use expr::{
    ancestor, and_all, cross_join, descendants, filter, func, lit_str, measure, order, path, set,
    ComparisonOp, MdxExpr, SortDir,
};
pub use statement::Statement;
pub use token::{Token, TokenStream};
