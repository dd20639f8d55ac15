//! Column declarations and the traits a record type implements to describe its table.

use crate::sql::BindValue;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// SQL type of a declared column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    Serial,
    Int,
    Varchar(u32),
    Text,
    /// NUMERIC(precision, scale)
    Numeric(u8, u8),
}

impl SqlType {
    pub fn ddl(&self) -> String {
        match self {
            SqlType::Serial => "SERIAL".into(),
            SqlType::Int => "INT".into(),
            SqlType::Varchar(n) => format!("VARCHAR({})", n),
            SqlType::Text => "TEXT".into(),
            SqlType::Numeric(p, s) => format!("NUMERIC({}, {})", p, s),
        }
    }
}

/// Column-level constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    PrimaryKey,
    NotNull,
    Unique,
    /// Foreign key to another table of the same prefix (base name, column).
    References(&'static str, &'static str),
    /// Raw CHECK expression.
    Check(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub constraints: &'static [Constraint],
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: SqlType, constraints: &'static [Constraint]) -> Self {
        ColumnDef {
            name,
            sql_type,
            constraints,
        }
    }
}

/// Values of a record that can be written, paired with their column names.
pub trait Fields: Send + Sync {
    fn values(&self) -> Vec<(&'static str, BindValue)>;
}

/// A record type stored in its own table.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    type Fields: Fields;

    /// Table name without the configured prefix.
    const BASE_NAME: &'static str;
    const COLUMNS: &'static [ColumnDef];
    const PRIMARY_KEY: &'static [&'static str] = &["id"];

    /// Extra table-level clauses appended after the column definitions.
    fn table_constraints(_prefix: &str) -> Vec<String> {
        Vec::new()
    }
}
