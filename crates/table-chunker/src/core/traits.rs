//! Core traits for the chunked copy engine.
//!
//! - [`Connection`]: runs the scalar lookups and copy statements
//! - [`Dialect`]: SQL syntax strategy for the target database
//! - [`OperatorConsole`]: line-oriented operator input while paused
//! - [`ProgressSink`]: receives per-chunk and end-of-run progress
//!
//! Every collaborator that can block is an async trait so the engine runs on
//! a tokio runtime and tests can substitute in-memory implementations.

use async_trait::async_trait;

use crate::chunk::ChunkRange;
use crate::chunker::CopyStats;
use crate::error::Result;

/// Database connection used by the chunker.
///
/// Only one statement is ever in flight: the chunker awaits each call before
/// issuing the next. Errors are not retried and abort the run.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Run a query returning at most one integer value.
    ///
    /// Returns `None` when the query yields no row or a NULL value, e.g.
    /// `min(id)` over an empty table.
    async fn select_scalar(&self, sql: &str) -> Result<Option<i64>>;

    /// Run a data-modifying statement and return the number of affected rows.
    async fn exec_update(&self, sql: &str) -> Result<u64>;
}

/// SQL syntax strategy for the generated statements.
pub trait Dialect: Send + Sync {
    /// Dialect name (e.g., "mysql", "postgres").
    fn name(&self) -> &str;

    /// Quote an identifier, escaping embedded quote characters.
    fn quote_ident(&self, name: &str) -> String;

    /// Build the idempotent copy statement for one primary-key window.
    ///
    /// Re-running the statement for the same window must never fail on, or
    /// duplicate, rows that were already copied.
    fn copy_statement(
        &self,
        destination: &str,
        origin: &str,
        columns: &[String],
        range: &ChunkRange,
    ) -> String;

    /// Quote and join a column list.
    fn column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Query for the lowest primary key of a table.
    fn min_id_query(&self, table: &str) -> String {
        format!("select min(id) from {}", self.quote_ident(table))
    }

    /// Query for the highest primary key of a table.
    fn max_id_query(&self, table: &str) -> String {
        format!("select max(id) from {}", self.quote_ident(table))
    }
}

/// Operator input used by the interactive pause menu.
#[async_trait]
pub trait OperatorConsole: Send {
    /// Show `text` and read one line of input.
    ///
    /// Returns `None` when the input stream is closed.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>>;
}

/// Receives progress while chunks are copied.
pub trait ProgressSink: Send {
    /// Called once per chunk, after its copy statement completed.
    fn chunk_copied(&mut self, chunk: &ChunkRange, affected_rows: u64);

    /// Called once after the last chunk.
    fn finished(&mut self, stats: &CopyStats);
}
