//! Declarations of the engine extension's SQL functions
//!
//! Each declaration fixes a name, arity and result kind so expression
//! code can compose and type calls without executing SQL. The engine
//! evaluates the functions; nothing here computes a result locally.

use sqlean_core::DataTypeCategory;
use std::fmt;

/// A named SQL function with a fixed result kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlFunction {
    /// Name as called in SQL
    pub name: &'static str,
    /// Number of arguments
    pub arity: usize,
    /// Result kind the engine documents for this function
    pub result: DataTypeCategory,
}

impl SqlFunction {
    pub const fn new(name: &'static str, arity: usize, result: DataTypeCategory) -> Self {
        Self {
            name,
            arity,
            result,
        }
    }

    /// Render a call expression over the given argument expressions
    pub fn call(&self, args: &[&str]) -> String {
        debug_assert_eq!(
            args.len(),
            self.arity,
            "{} takes {} argument(s)",
            self.name,
            self.arity
        );
        format!("{}({})", self.name, args.join(", "))
    }
}

impl fmt::Display for SqlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// `uuid4()` - generate a random (version 4) UUID
pub const UUID4: SqlFunction = SqlFunction::new("uuid4", 0, DataTypeCategory::Uuid);

/// `uuid_str(x)` - normalize a UUID string or blob to hyphenated text
pub const UUID_STR: SqlFunction = SqlFunction::new("uuid_str", 1, DataTypeCategory::Uuid);

/// `uuid_blob(x)` - convert a UUID string or blob to a 16-byte blob
pub const UUID_BLOB: SqlFunction = SqlFunction::new("uuid_blob", 1, DataTypeCategory::Binary);

/// `ipfamily(ip)` - address family code (4 or 6)
pub const IP_FAMILY: SqlFunction = SqlFunction::new("ipfamily", 1, DataTypeCategory::Integer);

/// `iphost(ip)` - host part of an IP endpoint
pub const IP_HOST: SqlFunction = SqlFunction::new("iphost", 1, DataTypeCategory::String);

/// `ipmasklen(ip)` - prefix length of an IP endpoint
pub const IP_MASK_LEN: SqlFunction = SqlFunction::new("ipmasklen", 1, DataTypeCategory::Integer);

/// `ipnetwork(ip)` - containing network of an IP endpoint
pub const IP_NETWORK: SqlFunction = SqlFunction::new("ipnetwork", 1, DataTypeCategory::Network);

/// `ipcontains(net, ip)` - whether `net` contains `ip`
pub const IP_CONTAINS: SqlFunction = SqlFunction::new("ipcontains", 2, DataTypeCategory::Boolean);

/// Quote a string as a SQL literal
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// IP helper calls composed over a column or expression.
///
/// Mirrors the comparator surface of the INET column type: each method
/// renders the corresponding helper call with the wrapped expression as
/// the first argument.
#[derive(Debug, Clone)]
pub struct InetExpr {
    expr: String,
}

impl InetExpr {
    /// Wrap a column name or SQL expression
    pub fn new(expr: impl Into<String>) -> Self {
        Self { expr: expr.into() }
    }

    /// `ipfamily(expr)`
    pub fn family(&self) -> String {
        IP_FAMILY.call(&[self.expr.as_str()])
    }

    /// `iphost(expr)`
    pub fn host(&self) -> String {
        IP_HOST.call(&[self.expr.as_str()])
    }

    /// `ipmasklen(expr)`
    pub fn mask_len(&self) -> String {
        IP_MASK_LEN.call(&[self.expr.as_str()])
    }

    /// `ipnetwork(expr)`
    pub fn network(&self) -> String {
        IP_NETWORK.call(&[self.expr.as_str()])
    }

    /// `ipcontains(expr, other)`
    pub fn contains(&self, other: &str) -> String {
        IP_CONTAINS.call(&[self.expr.as_str(), other])
    }
}
