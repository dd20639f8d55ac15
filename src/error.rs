//! Typed errors for table access and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Coarse classification of a [`TableError`], for callers that branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Dependents,
    Execution,
    Read,
}

#[derive(Error, Debug)]
pub enum TableError {
    /// A field or relationship rule was violated; nothing was sent to the database.
    #[error("validation: {0}")]
    Validation(String),
    /// Delete refused while other rows still reference the target.
    #[error("cannot delete: {count} {dependent}(s) still reference it, delete them first")]
    Dependents { dependent: &'static str, count: i64 },
    /// Statement failed while changing data or schema; the transaction was rolled back.
    #[error("database: {0}")]
    Execution(#[from] sqlx::Error),
    /// A query that only reads could not be answered.
    #[error("read: {0}")]
    Read(#[source] sqlx::Error),
}

impl TableError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::Validation(_) => ErrorKind::Validation,
            TableError::Dependents { .. } => ErrorKind::Dependents,
            TableError::Execution(_) => ErrorKind::Execution,
            TableError::Read(_) => ErrorKind::Read,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        TableError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependents_message_carries_count() {
        let err = TableError::Dependents {
            dependent: "route",
            count: 3,
        };
        assert_eq!(err.kind(), ErrorKind::Dependents);
        assert_eq!(
            err.to_string(),
            "cannot delete: 3 route(s) still reference it, delete them first"
        );
    }

    #[test]
    fn driver_errors_convert_to_execution() {
        let err: TableError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Execution);
    }
}
