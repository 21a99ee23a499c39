/// Integration tests for the sqlean driver.
///
/// Tests that need the native extension libraries on disk are skipped
/// unless `SQLEAN_EXTENSION_DIR` points at a directory containing them;
/// everything else runs against the bundled engine.
use sqlean_core::{Connection, DatabaseDriver, SqleanError, Value};
use sqlean_driver::{
    Cidr, ColumnType, Extension, Inet, InetExpr, SqleanConnection, SqleanDriver, EXTENSION_DIR_ENV,
    IP_CONTAINS, IP_FAMILY, IP_NETWORK, UUID4, UUID_BLOB, UUID_STR,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Helper to create a file-backed test database
fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("sqlean_test_{}.db", uuid::Uuid::new_v4()))
}

/// Helper to cleanup test database files, including WAL and SHM siblings
fn cleanup_test_database(path: PathBuf) {
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

/// Directory with the native extension libraries, when available
fn live_extension_dir() -> Option<PathBuf> {
    let dir = std::env::var_os(EXTENSION_DIR_ENV).map(PathBuf::from)?;
    dir.is_dir().then_some(dir)
}

async fn connect(url: &str) -> Arc<dyn Connection> {
    let driver = SqleanDriver::new();
    let config = driver.parse_connection_string(url).expect("parse URL");
    driver.connect(&config).await.expect("connect")
}

#[tokio::test]
async fn test_file_database_round_trip() {
    let db_path = temp_db_path();
    let conn = SqleanConnection::open(db_path.to_str().unwrap()).expect("open file database");

    conn.execute(
        "CREATE TABLE hosts (id INTEGER PRIMARY KEY, addr INET, net CIDR, tag UUID)",
        &[],
    )
    .await
    .expect("create table");

    let endpoint: ipnet::IpNet = "192.168.16.12/24".parse().unwrap();
    let network: ipnet::IpNet = "192.168.16.0/24".parse().unwrap();
    let tag = uuid::Uuid::new_v4();

    conn.execute(
        "INSERT INTO hosts (addr, net, tag) VALUES (?, ?, ?)",
        &[
            Inet::bind(Some(endpoint)),
            Cidr::bind(Some(network)),
            sqlean_driver::Uuid::bind(Some(tag)),
        ],
    )
    .await
    .expect("insert");

    let result = conn
        .query("SELECT addr, net, tag FROM hosts", &[])
        .await
        .expect("select");
    let row = &result.rows[0];
    assert_eq!(Inet::read(row.get(0).unwrap()).unwrap(), Some(endpoint));
    assert_eq!(Cidr::read(row.get(1).unwrap()).unwrap(), Some(network));
    assert_eq!(
        sqlean_driver::Uuid::read(row.get(2).unwrap()).unwrap(),
        Some(tag)
    );

    conn.close().await.expect("close");
    cleanup_test_database(db_path);
}

#[tokio::test]
async fn test_null_round_trip_through_typed_columns() {
    let conn = connect("sqlite+sqlean:///:memory:").await;

    conn.execute("CREATE TABLE t (addr INET, net CIDR, tag UUID)", &[])
        .await
        .expect("create table");
    conn.execute(
        "INSERT INTO t VALUES (?, ?, ?)",
        &[Inet::bind(None), Cidr::bind(None), sqlean_driver::Uuid::bind(None)],
    )
    .await
    .expect("insert nulls");

    let result = conn.query("SELECT addr, net, tag FROM t", &[]).await.unwrap();
    let row = &result.rows[0];
    assert_eq!(Inet::read(row.get(0).unwrap()).unwrap(), None);
    assert_eq!(Cidr::read(row.get(1).unwrap()).unwrap(), None);
    assert_eq!(sqlean_driver::Uuid::read(row.get(2).unwrap()).unwrap(), None);
}

#[tokio::test]
async fn test_extension_function_fails_without_option() {
    let conn = connect("sqlite+sqlean:///:memory:").await;

    let err = conn
        .query("SELECT hex(md5('hello'))", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SqleanError::Query(_)));

    let err = conn
        .query("SELECT median(value) FROM generate_series(1, 99)", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SqleanError::Query(_)));
}

#[tokio::test]
async fn test_each_extension_group_loads() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    for ext in Extension::ALL {
        let url = format!("sqlite+sqlean:///:memory:?extensions={}", ext.name());
        let conn = connect(&url).await;
        let result = conn.query("SELECT 1", &[]).await.expect("query");
        assert_eq!(result.row_count(), 1, "group {}", ext.name());
    }
}

#[tokio::test]
async fn test_crypto_digest_of_fixed_literal() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=crypto").await;
    let result = conn
        .query("SELECT hex(md5('hello'))", &[])
        .await
        .expect("md5");
    assert_eq!(
        result.rows[0].get(0).and_then(Value::as_str),
        Some("5D41402ABC4B2A76B9719D911017C592")
    );
}

#[tokio::test]
async fn test_stats_median_over_series() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=stats").await;
    let result = conn
        .query("SELECT median(value) FROM generate_series(1, 99)", &[])
        .await
        .expect("median");
    assert_eq!(result.rows[0].get(0).and_then(Value::as_f64), Some(50.0));
}

#[tokio::test]
async fn test_all_loads_every_group() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=all").await;
    let result = conn
        .query(
            "SELECT hex(md5('hello')), median(value) FROM generate_series(1, 99)",
            &[],
        )
        .await
        .expect("combined query");
    let row = &result.rows[0];
    assert_eq!(
        row.get(0).and_then(Value::as_str),
        Some("5D41402ABC4B2A76B9719D911017C592")
    );
    assert_eq!(row.get(1).and_then(Value::as_f64), Some(50.0));
}

#[tokio::test]
async fn test_math_and_crypto_combined() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=math,crypto").await;
    let result = conn
        .query(
            "SELECT trunc(sin(pi() / 2)), hex(md5('hello'))",
            &[],
        )
        .await
        .expect("combined query");
    let row = &result.rows[0];
    assert_eq!(row.get(0).and_then(Value::as_f64), Some(1.0));
    assert_eq!(
        row.get(1).and_then(Value::as_str),
        Some("5D41402ABC4B2A76B9719D911017C592")
    );
}

#[tokio::test]
async fn test_ip_helpers_on_fixed_addresses() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=ipaddr").await;

    let result = conn
        .query(
            "SELECT ipfamily('192.168.1.1'), ipfamily('2001:db8::123'),
                    iphost('2001:db8::123/64'), ipmasklen('192.168.16.12/24'),
                    ipnetwork('192.168.16.12/24'),
                    ipcontains('192.168.16.0/24', '192.168.16.3'),
                    ipcontains('192.168.16.0/24', '10.0.0.1')",
            &[],
        )
        .await
        .expect("ip helpers");
    let row = &result.rows[0];
    assert_eq!(row.get(0).and_then(Value::as_i64), Some(4));
    assert_eq!(row.get(1).and_then(Value::as_i64), Some(6));
    assert_eq!(row.get(2).and_then(Value::as_str), Some("2001:db8::123"));
    assert_eq!(row.get(3).and_then(Value::as_i64), Some(24));
    assert_eq!(row.get(4).and_then(Value::as_str), Some("192.168.16.0/24"));
    assert_eq!(row.get(5).and_then(Value::as_bool), Some(true));
    assert_eq!(row.get(6).and_then(Value::as_bool), Some(false));
}

#[tokio::test]
async fn test_ip_helpers_compose_over_stored_columns() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=ipaddr").await;
    conn.execute("CREATE TABLE hosts (ip INET)", &[])
        .await
        .expect("create table");

    let endpoint: ipnet::IpNet = "192.168.16.12/24".parse().unwrap();
    conn.execute("INSERT INTO hosts VALUES (?)", &[Inet::bind(Some(endpoint))])
        .await
        .expect("insert");

    let ip = InetExpr::new("ip");
    let sql = format!(
        "SELECT {}, {}, {} FROM hosts",
        ip.family(),
        ip.mask_len(),
        ip.network()
    );
    let result = conn.query(&sql, &[]).await.expect("composed query");
    let row = &result.rows[0];
    assert_eq!(row.get(0).and_then(Value::as_i64), Some(4));
    assert_eq!(row.get(1).and_then(Value::as_i64), Some(24));
    assert_eq!(
        Cidr::read(row.get(2).unwrap()).unwrap(),
        Some("192.168.16.0/24".parse().unwrap())
    );
}

#[tokio::test]
async fn test_derived_ip_values_insert_from_select() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=ipaddr").await;
    conn.execute(
        "CREATE TABLE example (id INTEGER PRIMARY KEY, ip TEXT, network TEXT, family INTEGER)",
        &[],
    )
    .await
    .expect("create table");

    let insert = format!(
        "INSERT INTO example (ip, network, family)
         SELECT '192.168.1.1', {}, {}",
        IP_NETWORK.call(&["'192.168.1.1'"]),
        IP_FAMILY.call(&["'192.168.1.1'"]),
    );
    conn.execute(&insert, &[]).await.expect("insert from select");

    let result = conn
        .query("SELECT id, ip, network, family FROM example", &[])
        .await
        .expect("select");
    let row = &result.rows[0];
    assert_eq!(row.get(0).and_then(Value::as_i64), Some(1));
    assert_eq!(row.get(1).and_then(Value::as_str), Some("192.168.1.1"));
    assert_eq!(row.get(2).and_then(Value::as_str), Some("192.168.1.1/32"));
    assert_eq!(row.get(3).and_then(Value::as_i64), Some(4));
}

#[tokio::test]
async fn test_uuid_generation_has_valid_shape() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=uuid").await;

    for _ in 0..5 {
        let result = conn
            .query(&format!("SELECT {}", UUID4.call(&[])), &[])
            .await
            .expect("uuid4");
        let text = result.rows[0]
            .get(0)
            .and_then(Value::as_str)
            .expect("uuid text")
            .to_string();
        let parsed = sqlean_driver::Uuid::read(&Value::String(text)).unwrap();
        assert!(parsed.is_some());
    }
}

#[tokio::test]
async fn test_uuid_str_and_blob_are_consistent() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    const SAMPLE: &str = "8d144638-3baf-4901-a554-b541142c152b";
    let conn = connect("sqlite+sqlean:///:memory:?extensions=uuid").await;

    let literal = format!("'{}'", SAMPLE);
    let sql = format!(
        "SELECT {}, {}",
        UUID_STR.call(&[literal.as_str()]),
        UUID_BLOB.call(&[literal.as_str()]),
    );
    let result = conn.query(&sql, &[]).await.expect("uuid conversions");
    let row = &result.rows[0];

    let id = uuid::Uuid::parse_str(SAMPLE).unwrap();
    assert_eq!(row.get(0).and_then(Value::as_str), Some(SAMPLE));
    assert_eq!(row.get(1).and_then(Value::as_bytes), Some(&id.as_bytes()[..]));

    // Blob output reads back as the same identifier.
    assert_eq!(
        sqlean_driver::Uuid::read(row.get(1).unwrap()).unwrap(),
        Some(id)
    );

    // Round trip through both conversions lands on the sample again.
    let blob_call = UUID_BLOB.call(&[literal.as_str()]);
    let round_trip = format!("SELECT {}", UUID_STR.call(&[blob_call.as_str()]));
    let result = conn.query(&round_trip, &[]).await.expect("round trip");
    assert_eq!(result.rows[0].get(0).and_then(Value::as_str), Some(SAMPLE));
}

#[tokio::test]
async fn test_ipcontains_predicate_with_stored_lhs_and_rhs() {
    let Some(_dir) = live_extension_dir() else {
        eprintln!("skipping: {} not set", EXTENSION_DIR_ENV);
        return;
    };

    let conn = connect("sqlite+sqlean:///:memory:?extensions=ipaddr").await;
    conn.execute("CREATE TABLE hosts (ip INET)", &[])
        .await
        .expect("create table");

    let network: ipnet::IpNet = "192.168.16.0/24".parse().unwrap();
    conn.execute("INSERT INTO hosts VALUES (?)", &[Inet::bind(Some(network))])
        .await
        .expect("insert");

    // Stored column on the left, literal on the right.
    let lhs = conn
        .query(
            &format!("SELECT {} FROM hosts", IP_CONTAINS.call(&["ip", "'192.168.16.3'"])),
            &[],
        )
        .await
        .expect("lhs query");
    assert_eq!(lhs.rows[0].get(0).and_then(Value::as_bool), Some(true));

    // Literal on the left, stored column on the right.
    conn.execute("DELETE FROM hosts", &[]).await.unwrap();
    let member: ipnet::IpNet = "192.168.16.3/32".parse().unwrap();
    conn.execute("INSERT INTO hosts VALUES (?)", &[Inet::bind(Some(member))])
        .await
        .expect("insert");

    let rhs = conn
        .query(
            &format!(
                "SELECT {} FROM hosts",
                IP_CONTAINS.call(&["'192.168.16.0/24'", "iphost(ip)"])
            ),
            &[],
        )
        .await
        .expect("rhs query");
    assert_eq!(rhs.rows[0].get(0).and_then(Value::as_bool), Some(true));
}
