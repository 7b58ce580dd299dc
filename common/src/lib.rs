use arrow::error::ArrowError;
use thiserror::Error;

pub mod config;
pub mod logging;
pub mod tables;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Failed to parse {column} '{value}' on line {line}: {reason}")]
    Parse {
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Query not found: {0}")]
    QueryNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn parse(
        line: u64,
        column: &str,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Error::Parse {
            line,
            column: column.to_string(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_line_and_column() {
        let err = Error::parse(7, "order_date", "2023-13-40", "input is out of range");
        assert_eq!(
            err.to_string(),
            "Failed to parse order_date '2023-13-40' on line 7: input is out of range"
        );
    }
}
