//! sqlean extension groups and connect-time loading
//!
//! The engine variant ships its extra SQL surface as loadable extension
//! libraries, one per group (`crypto.so`, `stats.so`, ...). A connection
//! option selects which groups to load; loading happens once, right after
//! the database is opened and before any statement executes.

use rusqlite::{Connection as RusqliteConnection, LoadExtensionGuard};
use sqlean_core::{Result, SqleanError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable pointing at the directory holding the extension
/// libraries. The `extension_dir` connection parameter takes precedence.
pub const EXTENSION_DIR_ENV: &str = "SQLEAN_EXTENSION_DIR";

/// A sqlean extension group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Hashing and encoding (md5, sha1, sha256, sha512, encode, decode)
    Crypto,
    /// User-defined functions in SQL (define, eval)
    Define,
    /// File I/O (readfile, writefile, lsdir)
    Fileio,
    /// Fuzzy string matching (dlevenshtein, caverphone, ...)
    Fuzzy,
    /// IP address helpers (ipfamily, iphost, ipmasklen, ipnetwork, ipcontains)
    Ipaddr,
    /// Math functions (sqrt, sin, trunc, ...)
    Math,
    /// Regular expressions (regexp_like, regexp_substr, regexp_replace)
    Regexp,
    /// Statistical aggregates (median, percentile, stddev, ...)
    Stats,
    /// String functions beyond the builtins
    Text,
    /// High-resolution time functions
    Time,
    /// Unicode-aware case mapping and collation
    Unicode,
    /// UUID generation and conversion (uuid4, uuid_str, uuid_blob)
    Uuid,
    /// CSV virtual tables
    Vsv,
}

impl Extension {
    /// Every known extension group, the set `extensions=all` loads.
    pub const ALL: [Extension; 13] = [
        Extension::Crypto,
        Extension::Define,
        Extension::Fileio,
        Extension::Fuzzy,
        Extension::Ipaddr,
        Extension::Math,
        Extension::Regexp,
        Extension::Stats,
        Extension::Text,
        Extension::Time,
        Extension::Unicode,
        Extension::Uuid,
        Extension::Vsv,
    ];

    /// Group name as it appears in the connection option
    pub fn name(&self) -> &'static str {
        match self {
            Extension::Crypto => "crypto",
            Extension::Define => "define",
            Extension::Fileio => "fileio",
            Extension::Fuzzy => "fuzzy",
            Extension::Ipaddr => "ipaddr",
            Extension::Math => "math",
            Extension::Regexp => "regexp",
            Extension::Stats => "stats",
            Extension::Text => "text",
            Extension::Time => "time",
            Extension::Unicode => "unicode",
            Extension::Uuid => "uuid",
            Extension::Vsv => "vsv",
        }
    }

    /// C entry point of the extension library
    pub fn entry_point(&self) -> &'static str {
        match self {
            Extension::Crypto => "sqlite3_crypto_init",
            Extension::Define => "sqlite3_define_init",
            Extension::Fileio => "sqlite3_fileio_init",
            Extension::Fuzzy => "sqlite3_fuzzy_init",
            Extension::Ipaddr => "sqlite3_ipaddr_init",
            Extension::Math => "sqlite3_math_init",
            Extension::Regexp => "sqlite3_regexp_init",
            Extension::Stats => "sqlite3_stats_init",
            Extension::Text => "sqlite3_text_init",
            Extension::Time => "sqlite3_time_init",
            Extension::Unicode => "sqlite3_unicode_init",
            Extension::Uuid => "sqlite3_uuid_init",
            Extension::Vsv => "sqlite3_vsv_init",
        }
    }

    /// File name of the shared library for the current platform
    pub fn library_file(&self) -> String {
        format!("{}{}", self.name(), std::env::consts::DLL_SUFFIX)
    }

    /// Full library path inside the given directory
    pub fn library_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.library_file())
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extension {
    type Err = SqleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crypto" => Ok(Extension::Crypto),
            "define" => Ok(Extension::Define),
            "fileio" => Ok(Extension::Fileio),
            "fuzzy" => Ok(Extension::Fuzzy),
            "ipaddr" => Ok(Extension::Ipaddr),
            "math" => Ok(Extension::Math),
            "regexp" => Ok(Extension::Regexp),
            "stats" => Ok(Extension::Stats),
            "text" => Ok(Extension::Text),
            "time" => Ok(Extension::Time),
            "unicode" => Ok(Extension::Unicode),
            "uuid" => Ok(Extension::Uuid),
            "vsv" => Ok(Extension::Vsv),
            other => Err(SqleanError::Configuration(format!(
                "Unknown extension group '{}'",
                other
            ))),
        }
    }
}

/// The set of extension groups a connection asks for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtensionSet {
    /// No option given; nothing is loaded
    #[default]
    None,
    /// `extensions=all`
    All,
    /// An explicit list of groups, in request order without duplicates
    Named(Vec<Extension>),
}

impl ExtensionSet {
    /// Parse the `extensions` connection option.
    ///
    /// The option is a comma-separated list of group names; the literal
    /// `all` anywhere in the list selects every known group. Unknown names
    /// fail immediately with a configuration error.
    pub fn parse(option: &str) -> Result<Self> {
        let mut named = Vec::new();
        for part in option.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if part.eq_ignore_ascii_case("all") {
                return Ok(ExtensionSet::All);
            }
            let ext = part.parse::<Extension>()?;
            if !named.contains(&ext) {
                named.push(ext);
            }
        }
        if named.is_empty() {
            Ok(ExtensionSet::None)
        } else {
            Ok(ExtensionSet::Named(named))
        }
    }

    /// The groups this set resolves to
    pub fn groups(&self) -> &[Extension] {
        match self {
            ExtensionSet::None => &[],
            ExtensionSet::All => &Extension::ALL,
            ExtensionSet::Named(groups) => groups,
        }
    }

    /// Whether the set loads nothing
    pub fn is_empty(&self) -> bool {
        self.groups().is_empty()
    }

    /// Render back to the connection-option form
    pub fn to_option(&self) -> Option<String> {
        match self {
            ExtensionSet::None => None,
            ExtensionSet::All => Some("all".to_string()),
            ExtensionSet::Named(groups) => Some(
                groups
                    .iter()
                    .map(Extension::name)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

/// Load every group of the set into an open connection.
///
/// Extension loading is toggled only for the duration of the call; the
/// loaded set is fixed for the rest of the connection's lifetime.
#[allow(unsafe_code)]
pub(crate) fn load_extensions(
    conn: &RusqliteConnection,
    set: &ExtensionSet,
    dir: &Path,
) -> Result<()> {
    if set.is_empty() {
        return Ok(());
    }

    // SAFETY: the guard enables C extension loading for this connection
    // only while it is alive, and the libraries loaded here are the engine
    // vendor's extension bundle resolved from a caller-controlled
    // directory, looked up by their published entry points.
    unsafe {
        let _guard = LoadExtensionGuard::new(conn).map_err(|e| {
            SqleanError::Extension(format!("Failed to enable extension loading: {}", e))
        })?;

        for ext in set.groups() {
            let path = ext.library_path(dir);
            tracing::debug!(extension = %ext, path = %path.display(), "loading extension");
            conn.load_extension(&path, Some(ext.entry_point()))
                .map_err(|e| {
                    SqleanError::Extension(format!(
                        "Failed to load extension '{}' from '{}': {}",
                        ext,
                        path.display(),
                        e
                    ))
                })?;
        }
    }

    tracing::info!(count = set.groups().len(), "extensions loaded");
    Ok(())
}

/// Resolve the directory holding the extension libraries.
///
/// Precedence: explicit override (the `extension_dir` connection
/// parameter), then the `SQLEAN_EXTENSION_DIR` environment variable, then
/// a per-user data directory.
pub fn resolve_extension_dir(explicit: Option<&str>) -> PathBuf {
    if let Some(dir) = explicit {
        return PathBuf::from(dir);
    }
    if let Some(dir) = std::env::var_os(EXTENSION_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sqlean")
        .join("extensions")
}
