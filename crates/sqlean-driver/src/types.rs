//! Custom column types for the engine's extension modules
//!
//! The engine stores these as TEXT; the adapters here convert between the
//! stored form and structured values. Conversion is pure: nulls pass
//! through untouched in both directions, and malformed stored text
//! surfaces as a data error.

use ipnet::IpNet;
use sqlean_core::{Result, SqleanError, Value};
use std::net::IpAddr;

/// A column type with a canonical text storage form.
///
/// `bind` turns an outgoing structured value into the value the engine
/// stores; `read` turns a stored value back into the structured form.
pub trait ColumnType {
    /// The structured value this column holds
    type Native;

    /// DDL name of the type (e.g. "INET")
    const SQL_NAME: &'static str;

    /// Convert an outgoing value (or null) into its storage form
    fn bind(value: Option<Self::Native>) -> Value;

    /// Convert a stored value (or null) back into the structured form
    fn read(value: &Value) -> Result<Option<Self::Native>>;
}

/// IPv4/IPv6 endpoint: an address with a prefix length, host bits kept.
///
/// A bare address with no prefix reads as a full-length prefix
/// (/32 or /128).
pub struct Inet;

/// IPv4/IPv6 network: an address with a prefix length and zero host bits.
pub struct Cidr;

/// 128-bit identifier stored as hyphenated lowercase text.
pub struct Uuid;

impl ColumnType for Inet {
    type Native = IpNet;

    const SQL_NAME: &'static str = "INET";

    fn bind(value: Option<IpNet>) -> Value {
        match value {
            Some(net) => Value::String(net.to_string()),
            None => Value::Null,
        }
    }

    fn read(value: &Value) -> Result<Option<IpNet>> {
        match value {
            Value::Null => Ok(None),
            Value::Inet(net) | Value::Cidr(net) => Ok(Some(*net)),
            Value::String(text) => parse_interface(text).map(Some),
            Value::Bytes(bytes) => parse_interface(text_from_blob(bytes, "INET")?).map(Some),
            other => Err(SqleanError::Data(format!(
                "INET column holds non-text value {:?}",
                other
            ))),
        }
    }
}

impl ColumnType for Cidr {
    type Native = IpNet;

    const SQL_NAME: &'static str = "CIDR";

    fn bind(value: Option<IpNet>) -> Value {
        match value {
            // Stored form is the canonical network, host bits cleared.
            Some(net) => Value::String(net.trunc().to_string()),
            None => Value::Null,
        }
    }

    fn read(value: &Value) -> Result<Option<IpNet>> {
        match value {
            Value::Null => Ok(None),
            Value::Cidr(net) => Ok(Some(*net)),
            Value::Inet(net) => parse_network(&net.to_string()).map(Some),
            Value::String(text) => parse_network(text).map(Some),
            Value::Bytes(bytes) => parse_network(text_from_blob(bytes, "CIDR")?).map(Some),
            other => Err(SqleanError::Data(format!(
                "CIDR column holds non-text value {:?}",
                other
            ))),
        }
    }
}

impl ColumnType for Uuid {
    type Native = uuid::Uuid;

    const SQL_NAME: &'static str = "UUID";

    fn bind(value: Option<uuid::Uuid>) -> Value {
        match value {
            Some(id) => Value::String(id.to_string()),
            None => Value::Null,
        }
    }

    fn read(value: &Value) -> Result<Option<uuid::Uuid>> {
        match value {
            Value::Null => Ok(None),
            Value::Uuid(id) => Ok(Some(*id)),
            Value::String(text) => parse_uuid_text(text).map(Some),
            // The engine's uuid_blob() produces 16 raw bytes.
            Value::Bytes(bytes) if bytes.len() == 16 => uuid::Uuid::from_slice(bytes)
                .map(Some)
                .map_err(|e| SqleanError::Data(format!("Invalid UUID blob: {}", e))),
            Value::Bytes(bytes) => parse_uuid_text(text_from_blob(bytes, "UUID")?).map(Some),
            other => Err(SqleanError::Data(format!(
                "UUID column holds non-text value {:?}",
                other
            ))),
        }
    }
}

/// Parse an IP endpoint: `addr/prefix`, or a bare address which gets the
/// full-length prefix of its family.
fn parse_interface(text: &str) -> Result<IpNet> {
    let text = text.trim();
    if text.contains('/') {
        text.parse::<IpNet>()
            .map_err(|e| SqleanError::Data(format!("Invalid IP endpoint '{}': {}", text, e)))
    } else {
        let addr = text
            .parse::<IpAddr>()
            .map_err(|e| SqleanError::Data(format!("Invalid IP address '{}': {}", text, e)))?;
        let prefix_len = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        IpNet::new(addr, prefix_len)
            .map_err(|e| SqleanError::Data(format!("Invalid IP address '{}': {}", text, e)))
    }
}

/// Parse an IP network. Host bits set in the stored text are a data
/// error, not silently truncated.
fn parse_network(text: &str) -> Result<IpNet> {
    let net = parse_interface(text)?;
    if net != net.trunc() {
        return Err(SqleanError::Data(format!(
            "IP network '{}' has host bits set",
            text.trim()
        )));
    }
    Ok(net)
}

fn parse_uuid_text(text: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(text.trim())
        .map_err(|e| SqleanError::Data(format!("Invalid UUID '{}': {}", text.trim(), e)))
}

fn text_from_blob<'a>(bytes: &'a [u8], type_name: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| {
        SqleanError::Data(format!(
            "{} column holds a blob that is not UTF-8 text",
            type_name
        ))
    })
}
