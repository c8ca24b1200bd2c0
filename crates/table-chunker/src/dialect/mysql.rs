//! MySQL/MariaDB dialect.

use crate::chunk::ChunkRange;
use crate::core::traits::Dialect;

/// MySQL/MariaDB dialect implementation.
///
/// Copies use `insert ignore`, so rows whose primary key already exists in
/// the destination are skipped instead of failing the statement.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Create a new MySQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn copy_statement(
        &self,
        destination: &str,
        origin: &str,
        columns: &[String],
        range: &ChunkRange,
    ) -> String {
        let cols = self.column_list(columns);
        format!(
            "insert ignore into {} ({}) select {} from {} where {} between {} and {}",
            self.quote_ident(destination),
            cols,
            cols,
            self.quote_ident(origin),
            self.quote_ident("id"),
            range.low,
            range.high
        )
    }
}
