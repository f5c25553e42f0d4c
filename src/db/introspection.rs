use crate::error::{BrowseError, Result};
use tokio_postgres::Client;

/// `information_schema.columns.data_type` values treated as text. PostgreSQL
/// reports `char(n)` as `character`.
pub const TEXT_TYPES: [&str; 5] = ["text", "character varying", "varchar", "char", "character"];

pub async fn list_tables(client: &Client, schema: &str) -> Result<Vec<String>> {
    let rows = client
        .query(
            "SELECT table_name::text
             FROM information_schema.tables
             WHERE table_schema = $1 AND table_type = 'BASE TABLE'
             ORDER BY table_name",
            &[&schema],
        )
        .await
        .map_err(|e| BrowseError::query(&e))?;

    Ok(rows.iter().map(|row| row.get(0)).collect())
}

pub async fn first_text_column(
    client: &Client,
    schema: &str,
    table: &str,
) -> Result<Option<String>> {
    let types: Vec<&str> = TEXT_TYPES.to_vec();
    let row = client
        .query_opt(
            "SELECT column_name::text
             FROM information_schema.columns
             WHERE table_schema = $1 AND table_name = $2
               AND data_type::text = ANY($3::text[])
             ORDER BY ordinal_position
             LIMIT 1",
            &[&schema, &table, &types],
        )
        .await
        .map_err(|e| BrowseError::query(&e))?;

    Ok(row.map(|r| r.get(0)))
}

pub async fn first_column_any(
    client: &Client,
    schema: &str,
    table: &str,
) -> Result<Option<String>> {
    let row = client
        .query_opt(
            "SELECT column_name::text
             FROM information_schema.columns
             WHERE table_schema = $1 AND table_name = $2
             ORDER BY ordinal_position
             LIMIT 1",
            &[&schema, &table],
        )
        .await
        .map_err(|e| BrowseError::query(&e))?;

    Ok(row.map(|r| r.get(0)))
}

/// Server clock, shown on the page as evidence the connection is live.
pub async fn server_time(client: &Client) -> Result<String> {
    let row = client
        .query_one("SELECT now()::text", &[])
        .await
        .map_err(|e| BrowseError::query(&e))?;
    Ok(row.get(0))
}
