//! Database driver trait definition

use crate::{Connection, DialectInfo, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Capabilities that a driver may support
#[derive(Debug, Clone, Default)]
pub struct DriverCapabilities {
    /// Supports transactions
    pub supports_transactions: bool,
    /// Supports savepoints
    pub supports_savepoints: bool,
    /// Supports multiple statements in one batch
    pub supports_multiple_statements: bool,
    /// Supports RETURNING clause
    pub supports_returning: bool,
    /// Supports UPSERT/ON CONFLICT
    pub supports_upsert: bool,
    /// Supports window functions
    pub supports_window_functions: bool,
    /// Supports common table expressions (WITH)
    pub supports_cte: bool,
    /// Supports JSON operations
    pub supports_json: bool,
    /// Supports full-text search
    pub supports_full_text_search: bool,
    /// Supports EXPLAIN
    pub supports_explain: bool,
    /// Supports foreign keys
    pub supports_foreign_keys: bool,
    /// Supports views
    pub supports_views: bool,
    /// Supports triggers
    pub supports_triggers: bool,
    /// Supports loading native extension libraries at connect time
    pub supports_loadable_extensions: bool,
    /// Maximum parameters per query (None = no limit)
    pub max_parameters: Option<usize>,
}

/// Core driver trait that all database drivers must implement
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Unique identifier for this driver (e.g., "sqlean")
    fn id(&self) -> &'static str {
        self.name()
    }

    /// Registration name (e.g., "sqlean")
    fn name(&self) -> &'static str;

    /// Human-readable name
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Driver version
    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Supported features/capabilities
    fn capabilities(&self) -> DriverCapabilities;

    /// Get SQL dialect information
    ///
    /// Returns metadata about the SQL dialect this driver speaks, including
    /// keywords, functions, and data types. This is the extension point the
    /// rest of the toolkit consumes instead of hardcoding per-driver logic.
    fn dialect_info(&self) -> DialectInfo {
        DialectInfo::default()
    }

    /// Create a new connection
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>>;

    /// Test connection without keeping it open
    async fn test_connection(&self, config: &ConnectionConfig) -> Result<()>;

    /// Parse a connection string into a configuration
    fn parse_connection_string(&self, _conn_str: &str) -> Result<ConnectionConfig> {
        Err(crate::SqleanError::NotImplemented(
            "Connection string parsing not implemented for this driver".into(),
        ))
    }

    /// Build a connection string from configuration
    fn build_connection_string(&self, config: &ConnectionConfig) -> String;
}

/// Connection configuration
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Unique identifier
    pub id: uuid::Uuid,
    /// Display name
    pub name: String,
    /// Driver ID (e.g., "sqlean")
    pub driver: String,
    /// Database file path (file-based engines)
    pub database: Option<String>,
    /// Additional connection parameters
    pub params: HashMap<String, String>,
    /// Created timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ConnectionConfig {
    /// Create a new configuration with default values
    pub fn new(driver: &str, name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            driver: driver.to_string(),
            database: None,
            params: HashMap::new(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Set a connection parameter
    pub fn with_param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        let val = value.into();
        let str_val = match val {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        self.params.insert(key.to_string(), str_val);
        self
    }

    /// Get a string parameter
    pub fn get_string(&self, key: &str) -> Option<String> {
        if let Some(val) = self.params.get(key) {
            return Some(val.clone());
        }
        match key {
            "database" | "path" => self.database.clone(),
            _ => None,
        }
    }
}
