use common::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Resolves query names to the SQL text stored as `<sql_dir>/<name>.sql`.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    sql_dir: PathBuf,
}

impl QueryCatalog {
    pub fn new(sql_dir: impl Into<PathBuf>) -> Self {
        Self {
            sql_dir: sql_dir.into(),
        }
    }

    pub fn sql_dir(&self) -> &Path {
        &self.sql_dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.sql_dir.join(format!("{}.sql", name))
    }

    /// Returns the SQL text for `name`, or `None` when it cannot be read.
    pub fn load(&self, name: &str) -> Option<String> {
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_name {
            warn!(query = name, "Rejected query name");
            return None;
        }

        let path = self.path_for(name);
        match std::fs::read_to_string(&path) {
            Ok(sql) if sql.trim().is_empty() => {
                warn!(query = name, path = %path.display(), "Query definition is empty");
                None
            }
            Ok(sql) => Some(sql),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(query = name, path = %path.display(), "Query definition not found");
                None
            }
            Err(e) => {
                warn!(query = name, path = %path.display(), error = %e, "Query definition unreadable");
                None
            }
        }
    }

    /// Like [`load`](Self::load) but turns absence into an error.
    pub fn require(&self, name: &str) -> Result<String> {
        self.load(name)
            .ok_or_else(|| Error::QueryNotFound(name.to_string()))
    }
}
