//! Runs against a real server. Set `PGPEEK_TEST_DATABASE_URL` (for a local
//! server without TLS add `?sslmode=disable`) and run with `--ignored`.

use pgpeek_lib::db::{
    connect, fetch_rows, parse_database_url, ConnectionInfo, Connector, Identifier, PgConnector,
    Session,
};
use serde_json::{json, Value};

const SETUP: &str = "
    DROP TABLE IF EXISTS pgpeek_live_values;
    DROP TYPE IF EXISTS pgpeek_mood;
    CREATE TYPE pgpeek_mood AS ENUM ('happy', 'sad');
    CREATE TABLE pgpeek_live_values (
        id int, m pgpeek_mood, iv interval, n numeric, c \"char\", a int[], at timestamptz
    );
    INSERT INTO pgpeek_live_values VALUES
        (1, NULL, NULL, NULL, NULL, NULL, NULL),
        (2, 'sad', '2 hours', -0.5, 'y', '{3}', '2024-05-01 12:00:00+00');
";

fn test_connection_info() -> ConnectionInfo {
    let url = std::env::var("PGPEEK_TEST_DATABASE_URL")
        .expect("Skipping live test - PGPEEK_TEST_DATABASE_URL not set");
    parse_database_url(&url).expect("PGPEEK_TEST_DATABASE_URL is not a valid URL")
}

const TEARDOWN: &str = "
    DROP TABLE IF EXISTS pgpeek_live_values;
    DROP TYPE IF EXISTS pgpeek_mood;
";

#[tokio::test]
#[ignore] // Run manually with PGPEEK_TEST_DATABASE_URL
async fn test_rows_come_back_as_server_text() {
    let info = test_connection_info();
    let admin = connect(&info).await.unwrap();
    admin.batch_execute(SETUP).await.unwrap();

    let session = PgConnector.connect(&info).await.unwrap();
    let table = Identifier::parse("pgpeek_live_values").unwrap();
    let rows = fetch_rows(&session, &table).await;
    let server_time = session.server_time().await.unwrap();
    let at = admin
        .query_one("SELECT at::text FROM pgpeek_live_values WHERE id = 2", &[])
        .await
        .unwrap()
        .get::<_, String>(0);

    admin.batch_execute(TEARDOWN).await.unwrap();
    let rows = rows.unwrap();

    let types: Vec<&str> = rows.columns.iter().map(|c| c.data_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["int4", "pgpeek_mood", "interval", "numeric", "char", "_int4", "timestamptz"]
    );
    assert_eq!(
        rows.rows[0],
        vec![
            json!(2),
            json!("sad"),
            json!("02:00:00"),
            json!("-0.5"),
            json!("y"),
            json!("{3}"),
            json!(at),
        ]
    );
    assert_eq!(rows.rows[1][0], json!(1));
    assert!(rows.rows[1][1..].iter().all(Value::is_null));
    assert!(!server_time.is_empty());
}

#[tokio::test]
#[ignore] // Run manually with PGPEEK_TEST_DATABASE_URL
async fn test_stacked_statements_are_refused() {
    let info = test_connection_info();
    let session = PgConnector.connect(&info).await.unwrap();

    let result = session.run_select("SELECT 1; SELECT 2").await;
    assert!(result.is_err());
    let rows = session.run_select("SELECT 1 AS one").await.unwrap();
    assert_eq!(rows.rows, vec![vec![json!(1)]]);
}
