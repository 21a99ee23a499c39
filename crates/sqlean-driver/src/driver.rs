//! sqlean driver implementation

use crate::connection::SqleanConnection;
use crate::extensions::{resolve_extension_dir, ExtensionSet};
use async_trait::async_trait;
use sqlean_core::{
    Connection, ConnectionConfig, DatabaseDriver, DialectInfo, DriverCapabilities, Result,
    SqleanError,
};
use std::sync::Arc;

/// URL schemes the driver answers to
const URL_SCHEMES: [&str; 2] = ["sqlite+sqlean", "sqlean"];

/// Driver for SQLite databases with the sqlean extension bundle
pub struct SqleanDriver;

impl SqleanDriver {
    /// Create a new driver instance
    pub fn new() -> Self {
        tracing::debug!("sqlean driver initialized");
        Self
    }
}

impl Default for SqleanDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for SqleanDriver {
    fn name(&self) -> &'static str {
        "sqlean"
    }

    fn display_name(&self) -> &'static str {
        "SQLite (sqlean)"
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities {
            supports_transactions: true,
            supports_savepoints: true,
            supports_multiple_statements: true,
            supports_returning: true,
            supports_upsert: true,
            supports_window_functions: true,
            supports_cte: true,
            supports_json: true,
            supports_full_text_search: true,
            supports_explain: true,
            supports_foreign_keys: true,
            supports_views: true,
            supports_triggers: true,
            supports_loadable_extensions: true,
            max_parameters: Some(999),
        }
    }

    fn dialect_info(&self) -> DialectInfo {
        crate::sqlean_dialect()
    }

    #[tracing::instrument(skip(self, config), fields(path = config.get_string("path").or_else(|| config.get_string("database")).as_deref()))]
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>> {
        let path = config
            .get_string("path")
            .or_else(|| config.get_string("database"))
            .ok_or_else(|| {
                SqleanError::Configuration(
                    "sqlean requires a 'path' or 'database' parameter. Use :memory: for an in-memory database".into(),
                )
            })?;

        // The extension set is fixed here, before the connection is handed
        // out; any statement relying on a group not in the set fails at
        // execution time with the engine's own error.
        let extensions = match config.get_string("extensions") {
            Some(option) => ExtensionSet::parse(&option)?,
            None => ExtensionSet::None,
        };
        let extension_dir = resolve_extension_dir(config.get_string("extension_dir").as_deref());

        let conn = SqleanConnection::open_with_extensions(&path, extensions, &extension_dir)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to connect to sqlean database");
                e
            })?;

        tracing::info!(path = %path, "sqlean connection created");
        Ok(Arc::new(conn))
    }

    #[tracing::instrument(skip(self, config))]
    async fn test_connection(&self, config: &ConnectionConfig) -> Result<()> {
        tracing::debug!("testing sqlean connection");
        let conn = self.connect(config).await?;
        conn.query("SELECT 1", &[]).await?;
        Ok(())
    }

    /// Parse a connection URL of the form
    /// `sqlite+sqlean:///<path>?extensions=<list>`.
    ///
    /// The path follows the usual file-URL convention: three slashes for a
    /// relative path or `:memory:`, four for an absolute path. The
    /// `extensions` option is validated here so a bad group name fails at
    /// configuration time, not at connect.
    fn parse_connection_string(&self, conn_str: &str) -> Result<ConnectionConfig> {
        let parsed = url::Url::parse(conn_str)
            .map_err(|e| SqleanError::Configuration(format!("Invalid connection URL: {}", e)))?;

        if !URL_SCHEMES.contains(&parsed.scheme()) {
            return Err(SqleanError::Configuration(format!(
                "Unsupported URL scheme '{}', expected one of: {}",
                parsed.scheme(),
                URL_SCHEMES.join(", ")
            )));
        }

        let raw_path = parsed.path();
        let database = match raw_path.strip_prefix('/').unwrap_or(raw_path) {
            "" => ":memory:".to_string(),
            path => path.to_string(),
        };

        let mut config = ConnectionConfig::new(self.name(), &database);
        config.database = Some(database);

        for (key, value) in parsed.query_pairs() {
            if key == "extensions" {
                // Validate eagerly; the parsed set is rebuilt at connect.
                ExtensionSet::parse(&value)?;
            }
            config.params.insert(key.into_owned(), value.into_owned());
        }

        Ok(config)
    }

    fn build_connection_string(&self, config: &ConnectionConfig) -> String {
        let database = config
            .get_string("path")
            .or_else(|| config.get_string("database"))
            .unwrap_or_else(|| ":memory:".to_string());

        let mut url = format!("sqlite+sqlean:///{}", database);
        if let Some(extensions) = config.get_string("extensions") {
            url.push_str("?extensions=");
            url.push_str(&extensions);
        }
        url
    }
}
