//! # table-chunker
//!
//! Chunked bulk copy engine for online table migrations.
//!
//! Rows are copied from an origin table into its shadow table in bounded
//! primary-key windows, with:
//!
//! - **Idempotent copies** using `insert ignore`, safe to repeat after an interruption
//! - **Throttling** between windows to bound load and replication lag
//! - **Pause/resume** on Ctrl-C, with live throttle and stride changes
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use table_chunker::{Chunker, ChunkerOptions, DotProgress, MigrationDescriptor, StdioConsole};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let connection = Arc::new(table_chunker::drivers::MysqlConnection::connect(
//!         "mysql://root@localhost/app",
//!     ).await?);
//!     let migration = MigrationDescriptor::new(
//!         "users",
//!         "lhmn_users",
//!         vec!["id".into(), "name".into(), "email".into()],
//!     )?;
//!     let mut chunker = Chunker::new(migration, connection, ChunkerOptions::default()).await?;
//!     let stats = chunker
//!         .run(&mut StdioConsole::new(), &mut DotProgress::stdout())
//!         .await?;
//!     println!("Copied {} rows", stats.rows_copied);
//!     Ok(())
//! }
//! ```

pub mod chunk;
pub mod chunker;
pub mod config;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod interrupt;
pub mod progress;
pub mod throttle;

// Re-exports for convenient access
pub use chunk::{ChunkPlan, ChunkRange};
pub use chunker::{Chunker, CopyStats};
pub use config::ChunkerOptions;
pub use crate::core::{Connection, Dialect, MigrationDescriptor, OperatorConsole, ProgressSink};
pub use dialect::{MysqlDialect, PostgresDialect};
pub use error::{ChunkerError, Result};
pub use interrupt::{InterruptGuard, PauseFlag, PauseOutcome, PauseState, StdioConsole};
pub use progress::{DotProgress, NoProgress};
pub use throttle::Throttler;
