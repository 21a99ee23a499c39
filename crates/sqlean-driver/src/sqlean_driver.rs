//! sqlean database driver implementation
//!
//! Plugs the sqlean SQLite variant (SQLite plus the sqlean loadable
//! extension bundle) into the toolkit's driver registry. The driver opens
//! plain SQLite databases and, when the connection options ask for it,
//! loads the requested native extension groups before the first statement
//! runs on the connection.

mod connection;
#[cfg(test)]
mod connection_tests;
mod dialect;
#[cfg(test)]
mod dialect_tests;
mod driver;
#[cfg(test)]
mod driver_tests;
mod extensions;
#[cfg(test)]
mod extensions_tests;
mod functions;
#[cfg(test)]
mod functions_tests;
mod types;
#[cfg(test)]
mod types_tests;

pub use connection::SqleanConnection;
pub use dialect::sqlean_dialect;
pub use driver::SqleanDriver;
pub use extensions::{resolve_extension_dir, Extension, ExtensionSet, EXTENSION_DIR_ENV};
pub use functions::{
    quote_literal, InetExpr, SqlFunction, IP_CONTAINS, IP_FAMILY, IP_HOST, IP_MASK_LEN,
    IP_NETWORK, UUID4, UUID_BLOB, UUID_STR,
};
pub use types::{Cidr, ColumnType, Inet, Uuid};

use sqlean_core::DriverRegistry;
use std::sync::Arc;

/// Build a registry with the sqlean driver registered
pub fn default_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    registry.register(Arc::new(SqleanDriver::new()));
    registry
}
