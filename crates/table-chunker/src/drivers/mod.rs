//! Database drivers implementing [`Connection`](crate::Connection).
//!
//! Drivers are behind feature flags:
//!
//! ```toml
//! [dependencies]
//! table-chunker = { version = "0.1", features = ["mysql"] }
//! ```

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "mysql")]
pub use mysql::MysqlConnection;
