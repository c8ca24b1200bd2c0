//! PostgreSQL dialect.

use crate::chunk::ChunkRange;
use crate::core::traits::Dialect;

/// PostgreSQL dialect implementation.
///
/// PostgreSQL has no `insert ignore`; `on conflict do nothing` gives the same
/// skip-existing-rows behaviour.
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Create a new PostgreSQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
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
            "insert into {} ({}) select {} from {} where {} between {} and {} on conflict do nothing",
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
