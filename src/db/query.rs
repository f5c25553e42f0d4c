use crate::db::identifier::Identifier;
use crate::db::session::Session;
use crate::error::{BrowseError, Result};
use serde_json::Value;
use tokio_postgres::types::Type;
use tokio_postgres::{Client, SimpleQueryMessage};

/// Hard cap on rows shown for any table or demo query.
pub const ROW_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    /// Server type name, shown as the column header tooltip.
    pub data_type: String,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn select_rows_sql(table: &Identifier) -> String {
    format!(
        "SELECT * FROM {} ORDER BY 1 DESC LIMIT {}",
        table.quoted(),
        ROW_LIMIT
    )
}

/// Latest rows of an already validated table.
pub async fn fetch_rows<S: Session>(session: &S, table: &Identifier) -> Result<RowSet> {
    let sql = select_rows_sql(table);
    tracing::debug!(%sql, "fetching rows");
    session.run_select(&sql).await
}

/// Runs a single statement inside a read-only transaction that is always
/// rolled back.
pub async fn run_read_only(client: &Client, sql: &str) -> Result<RowSet> {
    client
        .batch_execute("BEGIN READ ONLY")
        .await
        .map_err(|e| BrowseError::query(&e))?;

    let result = select(client, sql).await;

    if let Err(e) = client.batch_execute("ROLLBACK").await {
        tracing::warn!("rollback failed: {}", e);
    }
    result
}

// `prepare` refuses text holding more than one statement and gives the
// column types. The values themselves come back in the server's text form.
async fn select(client: &Client, sql: &str) -> Result<RowSet> {
    let stmt = client.prepare(sql).await.map_err(|e| BrowseError::query(&e))?;
    let types: Vec<Type> = stmt.columns().iter().map(|c| c.type_().clone()).collect();
    let columns: Vec<ColumnDef> = stmt
        .columns()
        .iter()
        .map(|col| ColumnDef {
            name: col.name().to_string(),
            data_type: col.type_().name().to_string(),
        })
        .collect();

    let messages = client
        .simple_query(sql)
        .await
        .map_err(|e| BrowseError::query(&e))?;

    let rows: Vec<Vec<Value>> = messages
        .iter()
        .filter_map(|message| match message {
            SimpleQueryMessage::Row(row) => Some(row),
            _ => None,
        })
        .take(ROW_LIMIT)
        .map(|row| {
            (0..row.len())
                .map(|i| match types.get(i) {
                    Some(ty) => text_to_json(row.get(i), ty),
                    None => row.get(i).map_or(Value::Null, |s| Value::String(s.to_string())),
                })
                .collect()
        })
        .collect();

    Ok(RowSet { columns, rows })
}

/// Turns one text-format cell into a JSON value. Integers, floats and
/// booleans become typed values; everything else keeps the server's text.
pub fn text_to_json(text: Option<&str>, pg_type: &Type) -> Value {
    let Some(text) = text else {
        return Value::Null;
    };
    let as_text = || Value::String(text.to_string());

    match *pg_type {
        Type::BOOL => match text {
            "t" => Value::Bool(true),
            "f" => Value::Bool(false),
            _ => as_text(),
        },
        Type::INT2 | Type::INT4 | Type::INT8 | Type::OID => {
            text.parse::<i64>().map(Value::from).unwrap_or_else(|_| as_text())
        }
        Type::FLOAT4 | Type::FLOAT8 => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(as_text),
        _ => as_text(),
    }
}
