use super::catalog::QueryCatalog;
use crate::utils::arrow::query_to_batch;
use arrow::record_batch::RecordBatch;
use common::config::Settings;
use common::{Error, Result};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only access to the store.
///
/// Holds no connection: every `run` opens its own and closes it on return,
/// so a reader always sees the latest completed ETL run.
#[derive(Debug, Clone)]
pub struct QueryService {
    database: PathBuf,
    catalog: QueryCatalog,
}

impl QueryService {
    pub fn new(database: impl Into<PathBuf>, sql_dir: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            catalog: QueryCatalog::new(sql_dir),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.database.path, &settings.queries.sql_dir)
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    pub fn connect(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.database,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::StoreUnavailable(format!("{}: {}", self.database.display(), e)))
    }

    pub fn load_query(&self, name: &str) -> Option<String> {
        self.catalog.load(name)
    }

    pub fn run(&self, sql: &str, params: &[Value]) -> Result<RecordBatch> {
        let conn = self.connect()?;
        let batch = {
            let mut stmt = conn.prepare(sql)?;
            query_to_batch(&mut stmt, params)?
        };

        debug!(rows = batch.num_rows(), "Query finished");
        Ok(batch)
    }
}
