//! SQL dialect metadata
//!
//! Drivers describe their SQL surface through these types: keywords,
//! functions with fixed result types, and data types. The toolkit's
//! completion and expression layers consume this metadata instead of
//! hardcoding per-driver knowledge.

use std::borrow::Cow;

/// Information about a SQL keyword
#[derive(Debug, Clone)]
pub struct KeywordInfo {
    /// The keyword (e.g., "SELECT", "PRAGMA")
    pub keyword: Cow<'static, str>,
    /// Category for grouping
    pub category: KeywordCategory,
    /// Brief description
    pub description: Option<Cow<'static, str>>,
}

impl KeywordInfo {
    pub const fn new(keyword: &'static str, category: KeywordCategory) -> Self {
        Self {
            keyword: Cow::Borrowed(keyword),
            category,
            description: None,
        }
    }

    pub const fn with_desc(
        keyword: &'static str,
        category: KeywordCategory,
        description: &'static str,
    ) -> Self {
        Self {
            keyword: Cow::Borrowed(keyword),
            category,
            description: Some(Cow::Borrowed(description)),
        }
    }
}

/// Categories of SQL keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Data Query Language (SELECT, FROM, WHERE, etc.)
    Dql,
    /// Data Manipulation Language (INSERT, UPDATE, DELETE)
    Dml,
    /// Data Definition Language (CREATE, ALTER, DROP)
    Ddl,
    /// Transaction Control (BEGIN, COMMIT, ROLLBACK)
    Transaction,
    /// Clauses (JOIN, ON, HAVING, GROUP BY, etc.)
    Clause,
    /// Operators (AND, OR, NOT, IN, LIKE, etc.)
    Operator,
    /// Database-specific commands (PRAGMA, ATTACH, etc.)
    DatabaseSpecific,
    /// Other keywords
    Other,
}

/// Information about a SQL function
#[derive(Debug, Clone)]
pub struct SqlFunctionInfo {
    /// Function name (e.g., "COUNT", "ipfamily")
    pub name: Cow<'static, str>,
    /// Category for grouping
    pub category: FunctionCategory,
    /// Brief description
    pub description: Option<Cow<'static, str>>,
    /// Signature string for display (e.g., "ipfamily(ip)")
    pub signature: Option<Cow<'static, str>>,
    /// Fixed result type, when the function has one
    pub return_type: Option<DataTypeCategory>,
}

impl SqlFunctionInfo {
    pub const fn new(name: &'static str, category: FunctionCategory) -> Self {
        Self {
            name: Cow::Borrowed(name),
            category,
            description: None,
            signature: None,
            return_type: None,
        }
    }

    pub fn with_signature(mut self, signature: &'static str) -> Self {
        self.signature = Some(Cow::Borrowed(signature));
        self
    }

    pub fn with_desc(mut self, description: &'static str) -> Self {
        self.description = Some(Cow::Borrowed(description));
        self
    }

    pub fn returns(mut self, return_type: DataTypeCategory) -> Self {
        self.return_type = Some(return_type);
        self
    }
}

/// Categories of SQL functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCategory {
    /// Aggregate functions (COUNT, SUM, AVG, etc.)
    Aggregate,
    /// Window functions (ROW_NUMBER, RANK, etc.)
    Window,
    /// String functions (CONCAT, SUBSTR, etc.)
    String,
    /// Numeric/Math functions (ABS, ROUND, etc.)
    Numeric,
    /// Date/Time functions (DATE, STRFTIME, etc.)
    DateTime,
    /// Type conversion (CAST, TYPEOF, etc.)
    Conversion,
    /// Conditional (COALESCE, NULLIF, IIF, etc.)
    Conditional,
    /// JSON functions
    Json,
    /// Cryptographic hashing and encoding
    Crypto,
    /// IP address helpers
    Network,
    /// UUID generation and conversion
    Uuid,
    /// Statistical aggregates
    Statistics,
    /// Regular expression helpers
    Regexp,
    /// Database-specific
    DatabaseSpecific,
    /// Other
    Other,
}

/// Information about a SQL data type
#[derive(Debug, Clone)]
pub struct DataTypeInfo {
    /// Type name as used in DDL (e.g., "INTEGER", "INET")
    pub name: Cow<'static, str>,
    /// Category for grouping
    pub category: DataTypeCategory,
    /// Brief description
    pub description: Option<Cow<'static, str>>,
}

impl DataTypeInfo {
    pub const fn new(name: &'static str, category: DataTypeCategory) -> Self {
        Self {
            name: Cow::Borrowed(name),
            category,
            description: None,
        }
    }

    pub fn with_desc(mut self, description: &'static str) -> Self {
        self.description = Some(Cow::Borrowed(description));
        self
    }
}

/// Categories of SQL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeCategory {
    /// Integer types
    Integer,
    /// Floating point
    Float,
    /// Fixed precision (NUMERIC)
    Decimal,
    /// Character/String
    String,
    /// Binary data
    Binary,
    /// Boolean
    Boolean,
    /// Date and time
    DateTime,
    /// JSON
    Json,
    /// UUID
    Uuid,
    /// Network types (INET, CIDR)
    Network,
    /// Other database-specific
    Other,
}

/// SQL dialect metadata a driver exposes to the toolkit
#[derive(Debug, Clone)]
pub struct DialectInfo {
    /// Dialect identifier (e.g., "sqlean")
    pub id: Cow<'static, str>,
    /// Human-readable name
    pub display_name: Cow<'static, str>,
    /// Keywords the dialect recognizes
    pub keywords: Vec<KeywordInfo>,
    /// Callable functions with signatures and result types
    pub functions: Vec<SqlFunctionInfo>,
    /// Data types usable in DDL
    pub data_types: Vec<DataTypeInfo>,
    /// Identifier quote character
    pub identifier_quote: char,
    /// String literal quote character
    pub string_quote: char,
    /// Statement terminator
    pub statement_terminator: char,
}

impl Default for DialectInfo {
    fn default() -> Self {
        Self {
            id: Cow::Borrowed(""),
            display_name: Cow::Borrowed(""),
            keywords: Vec::new(),
            functions: Vec::new(),
            data_types: Vec::new(),
            identifier_quote: '"',
            string_quote: '\'',
            statement_terminator: ';',
        }
    }
}

impl DialectInfo {
    /// Look up a function declaration by name (case-insensitive)
    pub fn function(&self, name: &str) -> Option<&SqlFunctionInfo> {
        self.functions
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Look up a data type by DDL name (case-insensitive)
    pub fn data_type(&self, name: &str) -> Option<&DataTypeInfo> {
        self.data_types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}
