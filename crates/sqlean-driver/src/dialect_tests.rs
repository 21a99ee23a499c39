//! Tests for the dialect metadata

use super::dialect::*;
use super::functions;
use sqlean_core::{DataTypeCategory, FunctionCategory};

mod dialect_info_tests {
    use super::*;

    #[test]
    fn test_identity() {
        let dialect = sqlean_dialect();
        assert_eq!(dialect.id, "sqlean");
        assert_eq!(dialect.display_name, "SQLite (sqlean)");
        assert_eq!(dialect.identifier_quote, '"');
        assert_eq!(dialect.string_quote, '\'');
        assert_eq!(dialect.statement_terminator, ';');
    }

    #[test]
    fn test_base_surface_is_present() {
        let dialect = sqlean_dialect();
        assert!(dialect.function("COUNT").is_some());
        assert!(dialect.keywords.iter().any(|k| k.keyword == "SELECT"));
        assert!(dialect.data_type("TEXT").is_some());
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let dialect = sqlean_dialect();
        assert!(dialect.function("Md5").is_some());
        assert!(dialect.data_type("inet").is_some());
    }

    #[test]
    fn test_unknown_lookups_return_none() {
        let dialect = sqlean_dialect();
        assert!(dialect.function("no_such_function").is_none());
        assert!(dialect.data_type("VARCHAR2").is_none());
    }
}

mod extension_surface_tests {
    use super::*;

    #[test]
    fn test_crypto_functions() {
        let dialect = sqlean_dialect();
        for name in ["md5", "sha1", "sha256", "sha512"] {
            let f = dialect.function(name).expect(name);
            assert_eq!(f.category, FunctionCategory::Crypto);
            assert_eq!(f.return_type, Some(DataTypeCategory::Binary));
        }
        assert_eq!(
            dialect.function("encode").unwrap().return_type,
            Some(DataTypeCategory::String)
        );
    }

    #[test]
    fn test_stats_functions() {
        let dialect = sqlean_dialect();
        let median = dialect.function("median").unwrap();
        assert_eq!(median.category, FunctionCategory::Statistics);
        assert_eq!(median.return_type, Some(DataTypeCategory::Float));
        assert!(dialect.function("percentile").is_some());
        assert!(dialect.function("generate_series").is_some());
    }

    #[test]
    fn test_ip_functions_have_fixed_result_types() {
        let dialect = sqlean_dialect();
        assert_eq!(
            dialect.function("ipfamily").unwrap().return_type,
            Some(DataTypeCategory::Integer)
        );
        assert_eq!(
            dialect.function("iphost").unwrap().return_type,
            Some(DataTypeCategory::String)
        );
        assert_eq!(
            dialect.function("ipmasklen").unwrap().return_type,
            Some(DataTypeCategory::Integer)
        );
        assert_eq!(
            dialect.function("ipnetwork").unwrap().return_type,
            Some(DataTypeCategory::Network)
        );
        assert_eq!(
            dialect.function("ipcontains").unwrap().return_type,
            Some(DataTypeCategory::Boolean)
        );
    }

    #[test]
    fn test_uuid_functions() {
        let dialect = sqlean_dialect();
        assert_eq!(
            dialect.function("uuid4").unwrap().return_type,
            Some(DataTypeCategory::Uuid)
        );
        assert_eq!(
            dialect.function("uuid_str").unwrap().return_type,
            Some(DataTypeCategory::Uuid)
        );
        assert_eq!(
            dialect.function("uuid_blob").unwrap().return_type,
            Some(DataTypeCategory::Binary)
        );
    }

    #[test]
    fn test_declared_functions_match_dialect_metadata() {
        let dialect = sqlean_dialect();
        for decl in [
            functions::UUID4,
            functions::UUID_STR,
            functions::UUID_BLOB,
            functions::IP_FAMILY,
            functions::IP_HOST,
            functions::IP_MASK_LEN,
            functions::IP_NETWORK,
            functions::IP_CONTAINS,
        ] {
            let info = dialect
                .function(decl.name)
                .unwrap_or_else(|| panic!("{} missing from dialect", decl.name));
            assert_eq!(info.return_type, Some(decl.result), "{}", decl.name);
        }
    }

    #[test]
    fn test_extension_column_types() {
        let dialect = sqlean_dialect();
        assert_eq!(
            dialect.data_type("INET").unwrap().category,
            DataTypeCategory::Network
        );
        assert_eq!(
            dialect.data_type("CIDR").unwrap().category,
            DataTypeCategory::Network
        );
        assert_eq!(
            dialect.data_type("UUID").unwrap().category,
            DataTypeCategory::Uuid
        );
    }
}
