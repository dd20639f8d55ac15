//! Resolved table: an entity's declaration bound to a prefix, columns sorted by name.

use super::types::{ColumnDef, Constraint, Entity};

#[derive(Clone, Debug)]
pub struct ResolvedTable {
    pub prefix: String,
    pub table_name: String,
    /// Sorted lexicographically by name.
    pub columns: Vec<ColumnDef>,
    pub pk_columns: Vec<String>,
    pub constraints: Vec<String>,
}

impl ResolvedTable {
    pub fn of<E: Entity>(prefix: &str) -> Self {
        let mut columns = E::COLUMNS.to_vec();
        columns.sort_by(|a, b| a.name.cmp(b.name));
        ResolvedTable {
            prefix: prefix.to_string(),
            table_name: format!("{}{}", prefix, E::BASE_NAME),
            columns,
            pk_columns: E::PRIMARY_KEY.iter().map(|s| s.to_string()).collect(),
            constraints: E::table_constraints(prefix),
        }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn column_names_without_id(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|c| c.name)
            .filter(|n| *n != "id")
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column definition as it appears inside CREATE TABLE.
    pub fn column_ddl(&self, col: &ColumnDef) -> String {
        let mut def = format!("{} {}", quoted(col.name), col.sql_type.ddl());
        for c in col.constraints {
            def.push(' ');
            match c {
                Constraint::PrimaryKey => def.push_str("PRIMARY KEY"),
                Constraint::NotNull => def.push_str("NOT NULL"),
                Constraint::Unique => def.push_str("UNIQUE"),
                Constraint::References(table, column) => def.push_str(&format!(
                    "REFERENCES {} ({})",
                    quoted(&format!("{}{}", self.prefix, table)),
                    quoted(column)
                )),
                Constraint::Check(expr) => def.push_str(&format!("CHECK ({})", expr)),
            }
        }
        def
    }
}

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
