//! SQL injection demo. **Intentionally vulnerable.**
//!
//! Only reachable when `ALLOW_UNSAFE_DEMO=1`. The filter text is pasted into
//! the `ILIKE` pattern without any escaping so that payloads such as
//! `o' OR '1'='1` change the meaning of the query. The statement still runs
//! read-only and through a prepared statement, which rules out stacked
//! DDL/DML but not data exfiltration.

use crate::db::{Identifier, RowSet, Session, ROW_LIMIT};
use crate::error::{BrowseError, Result};

/// What the demo block on the page shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoQueryContext {
    pub selected_table: Option<String>,
    pub chosen_column: Option<String>,
    pub raw_filter: String,
    pub generated_sql: Option<String>,
    /// `None` until a query was attempted or a column lookup failed.
    pub outcome: Option<Result<RowSet>>,
}

impl DemoQueryContext {
    pub fn new(selected_table: Option<&str>, raw_filter: &str) -> Self {
        DemoQueryContext {
            selected_table: selected_table.map(str::to_string),
            raw_filter: raw_filter.to_string(),
            ..Default::default()
        }
    }
}

/// `raw` is interpolated verbatim on purpose.
pub fn unsafe_filter_sql(table: &Identifier, column: &Identifier, raw: &str) -> String {
    format!(
        "SELECT * FROM {table} WHERE {table}.{column}::text ILIKE '%{raw}%' ORDER BY 1 DESC LIMIT {limit}",
        table = table.quoted(),
        column = column.quoted(),
        raw = raw,
        limit = ROW_LIMIT,
    )
}

/// Text column first, then whatever column comes first. Lookup errors count
/// as "not found".
pub async fn resolve_column<S: Session>(
    session: &S,
    schema: &str,
    table: &Identifier,
) -> Option<String> {
    match session.first_text_column(schema, table.as_str()).await {
        Ok(Some(column)) => return Some(column),
        Ok(None) => {}
        Err(e) => tracing::debug!("text column lookup failed for {}: {}", table, e),
    }
    match session.first_column_any(schema, table.as_str()).await {
        Ok(column) => column,
        Err(e) => {
            tracing::debug!("column lookup failed for {}: {}", table, e);
            None
        }
    }
}

pub async fn run_demo<S: Session>(
    session: &S,
    schema: &str,
    selected: Option<&str>,
    table: Option<&Identifier>,
    raw: &str,
) -> DemoQueryContext {
    let mut ctx = DemoQueryContext::new(selected, raw);
    let Some(table) = table else {
        return ctx;
    };

    ctx.chosen_column = resolve_column(session, schema, table).await;
    let Some(column_name) = ctx.chosen_column.as_deref() else {
        ctx.outcome = Some(Err(BrowseError::NoColumn(table.to_string())));
        return ctx;
    };
    if raw.is_empty() {
        return ctx;
    }

    let column = match Identifier::parse(column_name) {
        Ok(column) => column,
        Err(e) => {
            ctx.outcome = Some(Err(e));
            return ctx;
        }
    };

    let sql = unsafe_filter_sql(table, &column, raw);
    tracing::warn!(%sql, "running unsafe demo query");
    let result = session.run_select(&sql).await;
    if let Err(e) = &result {
        tracing::info!("demo query failed: {}", e);
    }
    ctx.generated_sql = Some(sql);
    ctx.outcome = Some(result);
    ctx
}
