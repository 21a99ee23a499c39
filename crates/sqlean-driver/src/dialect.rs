//! Dialect information for the sqlean engine variant
//!
//! Covers the SQLite base surface plus the functions and column types the
//! extension bundle adds. Function declarations carry fixed return types
//! so the expression layer can type calls without executing SQL.

use sqlean_core::{
    DataTypeCategory, DataTypeInfo, DialectInfo, FunctionCategory, KeywordCategory, KeywordInfo,
    SqlFunctionInfo,
};
use std::borrow::Cow;

/// Build the complete dialect info for the sqlean engine variant
pub fn sqlean_dialect() -> DialectInfo {
    DialectInfo {
        id: Cow::Borrowed("sqlean"),
        display_name: Cow::Borrowed("SQLite (sqlean)"),
        keywords: base_keywords(),
        functions: base_functions()
            .into_iter()
            .chain(extension_functions())
            .collect(),
        data_types: data_types(),
        identifier_quote: '"',
        string_quote: '\'',
        statement_terminator: ';',
    }
}

fn base_keywords() -> Vec<KeywordInfo> {
    vec![
        // DQL
        KeywordInfo::with_desc("SELECT", KeywordCategory::Dql, "Retrieve data from tables"),
        KeywordInfo::with_desc("FROM", KeywordCategory::Dql, "Specify source tables"),
        KeywordInfo::with_desc("WHERE", KeywordCategory::Dql, "Filter rows"),
        KeywordInfo::with_desc("ORDER BY", KeywordCategory::Dql, "Sort results"),
        KeywordInfo::with_desc("GROUP BY", KeywordCategory::Dql, "Group rows"),
        KeywordInfo::with_desc("HAVING", KeywordCategory::Dql, "Filter groups"),
        KeywordInfo::with_desc("LIMIT", KeywordCategory::Dql, "Limit result count"),
        KeywordInfo::with_desc("OFFSET", KeywordCategory::Dql, "Skip rows"),
        KeywordInfo::with_desc("DISTINCT", KeywordCategory::Dql, "Remove duplicates"),
        // DML
        KeywordInfo::with_desc("INSERT", KeywordCategory::Dml, "Insert rows"),
        KeywordInfo::with_desc("UPDATE", KeywordCategory::Dml, "Update rows"),
        KeywordInfo::with_desc("DELETE", KeywordCategory::Dml, "Delete rows"),
        KeywordInfo::with_desc("REPLACE", KeywordCategory::Dml, "Insert or replace rows"),
        // DDL
        KeywordInfo::with_desc("CREATE", KeywordCategory::Ddl, "Create database objects"),
        KeywordInfo::with_desc("ALTER", KeywordCategory::Ddl, "Modify database objects"),
        KeywordInfo::with_desc("DROP", KeywordCategory::Ddl, "Remove database objects"),
        KeywordInfo::with_desc("TABLE", KeywordCategory::Ddl, "Table object type"),
        KeywordInfo::with_desc("INDEX", KeywordCategory::Ddl, "Index object type"),
        KeywordInfo::with_desc("VIEW", KeywordCategory::Ddl, "View object type"),
        KeywordInfo::with_desc("TRIGGER", KeywordCategory::Ddl, "Trigger object type"),
        KeywordInfo::with_desc("PRIMARY KEY", KeywordCategory::Ddl, "Primary key constraint"),
        KeywordInfo::with_desc("FOREIGN KEY", KeywordCategory::Ddl, "Foreign key constraint"),
        KeywordInfo::with_desc("REFERENCES", KeywordCategory::Ddl, "Foreign key reference"),
        KeywordInfo::with_desc("UNIQUE", KeywordCategory::Ddl, "Unique constraint"),
        KeywordInfo::with_desc("CHECK", KeywordCategory::Ddl, "Check constraint"),
        KeywordInfo::with_desc("DEFAULT", KeywordCategory::Ddl, "Default value"),
        // Transaction
        KeywordInfo::with_desc("BEGIN", KeywordCategory::Transaction, "Start transaction"),
        KeywordInfo::with_desc("COMMIT", KeywordCategory::Transaction, "Commit transaction"),
        KeywordInfo::with_desc(
            "ROLLBACK",
            KeywordCategory::Transaction,
            "Rollback transaction",
        ),
        KeywordInfo::with_desc("SAVEPOINT", KeywordCategory::Transaction, "Create savepoint"),
        // Clauses
        KeywordInfo::with_desc("JOIN", KeywordCategory::Clause, "Join tables"),
        KeywordInfo::with_desc("LEFT JOIN", KeywordCategory::Clause, "Left outer join"),
        KeywordInfo::with_desc("ON", KeywordCategory::Clause, "Join condition"),
        KeywordInfo::with_desc("AS", KeywordCategory::Clause, "Alias"),
        KeywordInfo::with_desc("UNION", KeywordCategory::Clause, "Combine results"),
        KeywordInfo::with_desc("WITH", KeywordCategory::Clause, "Common Table Expression"),
        KeywordInfo::with_desc("VALUES", KeywordCategory::Clause, "Values clause"),
        KeywordInfo::with_desc("RETURNING", KeywordCategory::Clause, "Return affected rows"),
        // Operators
        KeywordInfo::with_desc("AND", KeywordCategory::Operator, "Logical AND"),
        KeywordInfo::with_desc("OR", KeywordCategory::Operator, "Logical OR"),
        KeywordInfo::with_desc("NOT", KeywordCategory::Operator, "Logical NOT"),
        KeywordInfo::with_desc("IN", KeywordCategory::Operator, "In list/subquery"),
        KeywordInfo::with_desc("LIKE", KeywordCategory::Operator, "Pattern matching"),
        KeywordInfo::with_desc("BETWEEN", KeywordCategory::Operator, "Range check"),
        KeywordInfo::with_desc("IS", KeywordCategory::Operator, "Identity comparison"),
        KeywordInfo::with_desc("NULL", KeywordCategory::Operator, "Null value"),
        KeywordInfo::with_desc("CASE", KeywordCategory::Operator, "Conditional expression"),
        // Engine-specific
        KeywordInfo::with_desc(
            "PRAGMA",
            KeywordCategory::DatabaseSpecific,
            "Engine configuration",
        ),
        KeywordInfo::with_desc("ATTACH", KeywordCategory::DatabaseSpecific, "Attach database"),
        KeywordInfo::with_desc("DETACH", KeywordCategory::DatabaseSpecific, "Detach database"),
        KeywordInfo::with_desc("VACUUM", KeywordCategory::DatabaseSpecific, "Rebuild database"),
        KeywordInfo::with_desc("EXPLAIN", KeywordCategory::DatabaseSpecific, "Query plan"),
    ]
}

fn base_functions() -> Vec<SqlFunctionInfo> {
    vec![
        // Aggregates
        SqlFunctionInfo::new("COUNT", FunctionCategory::Aggregate)
            .with_signature("COUNT(*) or COUNT(expression)")
            .returns(DataTypeCategory::Integer),
        SqlFunctionInfo::new("SUM", FunctionCategory::Aggregate).with_signature("SUM(expression)"),
        SqlFunctionInfo::new("AVG", FunctionCategory::Aggregate)
            .with_signature("AVG(expression)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("MIN", FunctionCategory::Aggregate).with_signature("MIN(expression)"),
        SqlFunctionInfo::new("MAX", FunctionCategory::Aggregate).with_signature("MAX(expression)"),
        // Strings
        SqlFunctionInfo::new("LENGTH", FunctionCategory::String)
            .with_signature("LENGTH(string)")
            .returns(DataTypeCategory::Integer),
        SqlFunctionInfo::new("SUBSTR", FunctionCategory::String)
            .with_signature("SUBSTR(string, start, length)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("UPPER", FunctionCategory::String)
            .with_signature("UPPER(string)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("LOWER", FunctionCategory::String)
            .with_signature("LOWER(string)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("TRIM", FunctionCategory::String)
            .with_signature("TRIM(string)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("REPLACE", FunctionCategory::String)
            .with_signature("REPLACE(string, from, to)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("CONCAT", FunctionCategory::String)
            .with_signature("CONCAT(value1, value2, ...)")
            .returns(DataTypeCategory::String),
        // Numeric
        SqlFunctionInfo::new("ABS", FunctionCategory::Numeric).with_signature("ABS(number)"),
        SqlFunctionInfo::new("ROUND", FunctionCategory::Numeric)
            .with_signature("ROUND(number, decimals)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("RANDOM", FunctionCategory::Numeric)
            .with_signature("RANDOM()")
            .returns(DataTypeCategory::Integer),
        // Date/Time
        SqlFunctionInfo::new("DATE", FunctionCategory::DateTime)
            .with_signature("DATE(timestring, modifier...)"),
        SqlFunctionInfo::new("DATETIME", FunctionCategory::DateTime)
            .with_signature("DATETIME(timestring, modifier...)"),
        SqlFunctionInfo::new("STRFTIME", FunctionCategory::DateTime)
            .with_signature("STRFTIME(format, timestring)"),
        // Conditional
        SqlFunctionInfo::new("COALESCE", FunctionCategory::Conditional)
            .with_signature("COALESCE(value1, value2, ...)"),
        SqlFunctionInfo::new("NULLIF", FunctionCategory::Conditional)
            .with_signature("NULLIF(value1, value2)"),
        SqlFunctionInfo::new("IIF", FunctionCategory::Conditional)
            .with_signature("IIF(condition, true_result, false_result)"),
        // Conversion
        SqlFunctionInfo::new("CAST", FunctionCategory::Conversion)
            .with_signature("CAST(expression AS type)"),
        SqlFunctionInfo::new("TYPEOF", FunctionCategory::Conversion)
            .with_signature("TYPEOF(expression)")
            .returns(DataTypeCategory::String),
        // JSON
        SqlFunctionInfo::new("JSON", FunctionCategory::Json)
            .with_signature("JSON(json_string)")
            .returns(DataTypeCategory::Json),
        SqlFunctionInfo::new("JSON_EXTRACT", FunctionCategory::Json)
            .with_signature("JSON_EXTRACT(json, path)"),
        // Other
        SqlFunctionInfo::new("HEX", FunctionCategory::Other)
            .with_signature("HEX(blob)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("QUOTE", FunctionCategory::Other)
            .with_signature("QUOTE(value)")
            .returns(DataTypeCategory::String),
    ]
}

/// Functions added by the extension bundle, keyed by group in the
/// descriptions. Calls fail at execution time unless the owning group was
/// loaded at connect.
fn extension_functions() -> Vec<SqlFunctionInfo> {
    vec![
        // crypto
        SqlFunctionInfo::new("md5", FunctionCategory::Crypto)
            .with_signature("md5(data)")
            .with_desc("MD5 hash of the argument (crypto group)")
            .returns(DataTypeCategory::Binary),
        SqlFunctionInfo::new("sha1", FunctionCategory::Crypto)
            .with_signature("sha1(data)")
            .with_desc("SHA-1 hash of the argument (crypto group)")
            .returns(DataTypeCategory::Binary),
        SqlFunctionInfo::new("sha256", FunctionCategory::Crypto)
            .with_signature("sha256(data)")
            .with_desc("SHA-256 hash of the argument (crypto group)")
            .returns(DataTypeCategory::Binary),
        SqlFunctionInfo::new("sha512", FunctionCategory::Crypto)
            .with_signature("sha512(data)")
            .with_desc("SHA-512 hash of the argument (crypto group)")
            .returns(DataTypeCategory::Binary),
        SqlFunctionInfo::new("encode", FunctionCategory::Crypto)
            .with_signature("encode(data, algo)")
            .with_desc("Encode binary data to text: base32, base64, base85, hex, url")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("decode", FunctionCategory::Crypto)
            .with_signature("decode(text, algo)")
            .with_desc("Decode text to binary data: base32, base64, base85, hex, url")
            .returns(DataTypeCategory::Binary),
        // stats
        SqlFunctionInfo::new("median", FunctionCategory::Statistics)
            .with_signature("median(expression)")
            .with_desc("Median value (stats group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("percentile", FunctionCategory::Statistics)
            .with_signature("percentile(expression, fraction)")
            .with_desc("Percentile value (stats group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("stddev", FunctionCategory::Statistics)
            .with_signature("stddev(expression)")
            .with_desc("Sample standard deviation (stats group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("stddev_pop", FunctionCategory::Statistics)
            .with_signature("stddev_pop(expression)")
            .with_desc("Population standard deviation (stats group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("variance", FunctionCategory::Statistics)
            .with_signature("variance(expression)")
            .with_desc("Sample variance (stats group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("var_pop", FunctionCategory::Statistics)
            .with_signature("var_pop(expression)")
            .with_desc("Population variance (stats group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("generate_series", FunctionCategory::Statistics)
            .with_signature("generate_series(start, stop, step)")
            .with_desc("Table-valued sequence generator (stats group)"),
        // ipaddr
        SqlFunctionInfo::new("ipfamily", FunctionCategory::Network)
            .with_signature("ipfamily(ip)")
            .with_desc("Address family code, 4 or 6 (ipaddr group)")
            .returns(DataTypeCategory::Integer),
        SqlFunctionInfo::new("iphost", FunctionCategory::Network)
            .with_signature("iphost(ip)")
            .with_desc("Host part of an IP endpoint (ipaddr group)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("ipmasklen", FunctionCategory::Network)
            .with_signature("ipmasklen(ip)")
            .with_desc("Prefix length of an IP endpoint (ipaddr group)")
            .returns(DataTypeCategory::Integer),
        SqlFunctionInfo::new("ipnetwork", FunctionCategory::Network)
            .with_signature("ipnetwork(ip)")
            .with_desc("Containing network of an IP endpoint (ipaddr group)")
            .returns(DataTypeCategory::Network),
        SqlFunctionInfo::new("ipcontains", FunctionCategory::Network)
            .with_signature("ipcontains(net, ip)")
            .with_desc("Whether net contains ip (ipaddr group)")
            .returns(DataTypeCategory::Boolean),
        // uuid
        SqlFunctionInfo::new("uuid4", FunctionCategory::Uuid)
            .with_signature("uuid4()")
            .with_desc("Random (version 4) UUID (uuid group)")
            .returns(DataTypeCategory::Uuid),
        SqlFunctionInfo::new("uuid_str", FunctionCategory::Uuid)
            .with_signature("uuid_str(x)")
            .with_desc("Normalize a UUID string or blob to hyphenated text (uuid group)")
            .returns(DataTypeCategory::Uuid),
        SqlFunctionInfo::new("uuid_blob", FunctionCategory::Uuid)
            .with_signature("uuid_blob(x)")
            .with_desc("Convert a UUID string or blob to a 16-byte blob (uuid group)")
            .returns(DataTypeCategory::Binary),
        // math
        SqlFunctionInfo::new("sqrt", FunctionCategory::Numeric)
            .with_signature("sqrt(number)")
            .with_desc("Square root (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("power", FunctionCategory::Numeric)
            .with_signature("power(base, exponent)")
            .with_desc("Exponentiation (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("sin", FunctionCategory::Numeric)
            .with_signature("sin(radians)")
            .with_desc("Sine (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("cos", FunctionCategory::Numeric)
            .with_signature("cos(radians)")
            .with_desc("Cosine (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("trunc", FunctionCategory::Numeric)
            .with_signature("trunc(number)")
            .with_desc("Truncate toward zero (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("floor", FunctionCategory::Numeric)
            .with_signature("floor(number)")
            .with_desc("Round down (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("ceil", FunctionCategory::Numeric)
            .with_signature("ceil(number)")
            .with_desc("Round up (math group)")
            .returns(DataTypeCategory::Float),
        SqlFunctionInfo::new("pi", FunctionCategory::Numeric)
            .with_signature("pi()")
            .with_desc("The constant pi (math group)")
            .returns(DataTypeCategory::Float),
        // regexp
        SqlFunctionInfo::new("regexp_like", FunctionCategory::Regexp)
            .with_signature("regexp_like(source, pattern)")
            .with_desc("Whether source matches pattern (regexp group)")
            .returns(DataTypeCategory::Boolean),
        SqlFunctionInfo::new("regexp_substr", FunctionCategory::Regexp)
            .with_signature("regexp_substr(source, pattern)")
            .with_desc("First match of pattern in source (regexp group)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("regexp_replace", FunctionCategory::Regexp)
            .with_signature("regexp_replace(source, pattern, replacement)")
            .with_desc("Replace matches of pattern in source (regexp group)")
            .returns(DataTypeCategory::String),
        // text
        SqlFunctionInfo::new("text_split", FunctionCategory::String)
            .with_signature("text_split(source, separator, index)")
            .with_desc("Split source and return the n-th part (text group)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("text_concat", FunctionCategory::String)
            .with_signature("text_concat(separator, value1, value2, ...)")
            .with_desc("Join values with a separator (text group)")
            .returns(DataTypeCategory::String),
        SqlFunctionInfo::new("text_length", FunctionCategory::String)
            .with_signature("text_length(source)")
            .with_desc("Number of characters in source (text group)")
            .returns(DataTypeCategory::Integer),
        // fuzzy
        SqlFunctionInfo::new("fuzzy_leven", FunctionCategory::String)
            .with_signature("fuzzy_leven(a, b)")
            .with_desc("Levenshtein distance (fuzzy group)")
            .returns(DataTypeCategory::Integer),
        SqlFunctionInfo::new("fuzzy_soundex", FunctionCategory::String)
            .with_signature("fuzzy_soundex(source)")
            .with_desc("Soundex code (fuzzy group)")
            .returns(DataTypeCategory::String),
        // time
        SqlFunctionInfo::new("time_now", FunctionCategory::DateTime)
            .with_signature("time_now()")
            .with_desc("Current time with nanosecond precision (time group)"),
        // define
        SqlFunctionInfo::new("define", FunctionCategory::DatabaseSpecific)
            .with_signature("define(name, body)")
            .with_desc("Define a user function in SQL (define group)"),
        SqlFunctionInfo::new("eval", FunctionCategory::DatabaseSpecific)
            .with_signature("eval(sql)")
            .with_desc("Evaluate a SQL expression (define group)"),
        // fileio
        SqlFunctionInfo::new("readfile", FunctionCategory::DatabaseSpecific)
            .with_signature("readfile(path)")
            .with_desc("Read a file as a blob (fileio group)")
            .returns(DataTypeCategory::Binary),
        SqlFunctionInfo::new("writefile", FunctionCategory::DatabaseSpecific)
            .with_signature("writefile(path, data)")
            .with_desc("Write a blob to a file (fileio group)")
            .returns(DataTypeCategory::Integer),
    ]
}

fn data_types() -> Vec<DataTypeInfo> {
    vec![
        // The engine's five storage classes
        DataTypeInfo::new("INTEGER", DataTypeCategory::Integer),
        DataTypeInfo::new("REAL", DataTypeCategory::Float),
        DataTypeInfo::new("TEXT", DataTypeCategory::String),
        DataTypeInfo::new("BLOB", DataTypeCategory::Binary),
        DataTypeInfo::new("NUMERIC", DataTypeCategory::Decimal),
        // Extension column types, stored as TEXT
        DataTypeInfo::new("INET", DataTypeCategory::Network)
            .with_desc("IPv4/IPv6 endpoint (address + prefix), stored as canonical text"),
        DataTypeInfo::new("CIDR", DataTypeCategory::Network)
            .with_desc("IPv4/IPv6 network (host bits zero), stored as canonical text"),
        DataTypeInfo::new("UUID", DataTypeCategory::Uuid)
            .with_desc("128-bit identifier, stored as hyphenated lowercase text"),
    ]
}
