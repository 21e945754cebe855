use std::path::PathBuf;

/// Default listen address for the record API.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3400";

/// File name of the record database inside the data directory.
pub const DB_FILE_NAME: &str = "users.redb";

/// Server configuration shared by the service binary and its tests.
///
/// The binary fills this from command-line flags or environment
/// variables, then passes it to storage layer initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the record database.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/users.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/users.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath(DB_FILE_NAME))
    }

    /// Directory that must exist before the database is opened.
    pub fn resolve_db_dir(&self) -> Option<PathBuf> {
        self.resolve_db_path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
