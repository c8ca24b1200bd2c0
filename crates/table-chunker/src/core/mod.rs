//! Core abstractions for the chunked copy engine.
//!
//! - [`identifier`]: identifier validation and quoting
//! - [`migration`]: the origin/destination descriptor
//! - [`traits`]: connection, dialect, console and progress seams

pub mod identifier;
pub mod migration;
pub mod traits;

pub use migration::MigrationDescriptor;
pub use traits::{Connection, Dialect, OperatorConsole, ProgressSink};
