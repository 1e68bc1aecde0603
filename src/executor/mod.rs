//! Statement execution against a BI service.
//!
//! The compiler only produces MDX text. Running it is delegated to a
//! [`StatementExecutor`], whose cellset answer is flattened into a [`Table`].
//!
//! # Example
//!
//! ```ignore
//! use mdxgen::executor::{query_table, StatementExecutor};
//!
//! async fn example(executor: &impl StatementExecutor) -> ExecutorResult<()> {
//!     let table = query_table(executor, &index, &ir, &CompileOptions::default()).await?;
//!     println!("{} rows", table.len());
//!     Ok(())
//! }
//! ```

mod cellset;
mod error;
mod table;

pub use cellset::{Cell, Cellset, Field, HeaderCell};
pub use error::{ExecutorError, ExecutorResult};
pub use table::Table;

use async_trait::async_trait;
use tracing::debug;

use crate::compile::{compile, CompileOptions};
use crate::ir::QueryIr;
use crate::metadata::MetadataIndex;

/// Runs MDX statements and returns their cellsets.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute one statement.
    async fn execute(&self, mdx: &str) -> ExecutorResult<Cellset>;
}

/// Compile `ir`, execute it and return the flattened table without
/// incomplete rows.
pub async fn query_table<E>(
    executor: &E,
    index: &MetadataIndex,
    ir: &QueryIr,
    options: &CompileOptions,
) -> ExecutorResult<Table>
where
    E: StatementExecutor + ?Sized,
{
    let output = compile(index, ir, options)?;
    let cellset = executor.execute(&output.mdx).await?;

    let mut table = cellset.to_table()?;
    let before = table.len();
    table.retain_complete_rows();
    debug!(rows = table.len(), dropped = before - table.len(), "flattened cellset");

    Ok(table)
}
