//! SQL dialects for generated copy statements (Strategy pattern).

mod mysql;
mod postgres;

pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;
