//! One page load, from connection string to the values the renderer needs.
//!
//! Each step runs at most once. Failures are captured where they happen and
//! stored on [`PageContext`]; the flow always ends with something to render.

use crate::config::Settings;
use crate::db::{self, parse_database_url, Connector, Identifier, RowSet, Session};
use crate::demo::{self, DemoQueryContext};
use crate::error::{BrowseError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub table: Option<String>,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected {
        user: String,
        host: String,
        server_time: String,
    },
    Failed(BrowseError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub schema: String,
    pub status: ConnectionStatus,
    pub tables: Result<Vec<String>>,
    pub selected: Option<String>,
    /// `None` when no valid table was selected and no row query was issued.
    pub rows: Option<Result<RowSet>>,
    /// Present only while the unsafe demo is enabled.
    pub demo: Option<DemoQueryContext>,
}

impl PageContext {
    fn failed(settings: &Settings, query: &PageQuery, error: BrowseError) -> Self {
        let selected = selected_table(query);
        PageContext {
            schema: settings.schema.clone(),
            status: ConnectionStatus::Failed(error),
            tables: Ok(Vec::new()),
            demo: settings
                .unsafe_demo_enabled()
                .then(|| DemoQueryContext::new(selected.as_deref(), raw_filter(query))),
            selected,
            rows: None,
        }
    }
}

fn selected_table(query: &PageQuery) -> Option<String> {
    query.table.clone().filter(|t| !t.is_empty())
}

fn raw_filter(query: &PageQuery) -> &str {
    query.raw.as_deref().unwrap_or("")
}

pub async fn load_page<C: Connector>(
    connector: &C,
    settings: &Settings,
    query: &PageQuery,
) -> PageContext {
    let Some(url) = settings
        .database_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
    else {
        tracing::warn!("DATABASE_URL is not set");
        return PageContext::failed(settings, query, BrowseError::MissingConfig);
    };

    let Some(info) = parse_database_url(url) else {
        tracing::warn!("DATABASE_URL could not be parsed");
        return PageContext::failed(settings, query, BrowseError::MalformedUrl);
    };

    let session = match connector.connect(&info).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(host = %info.host, "connection failed: {}", e);
            return PageContext::failed(settings, query, e);
        }
    };

    let server_time = match session.server_time().await {
        Ok(time) => time,
        Err(e) => {
            tracing::warn!(host = %info.host, "server time query failed: {}", e);
            return PageContext::failed(settings, query, e);
        }
    };

    let status = ConnectionStatus::Connected {
        user: info.user.clone(),
        host: info.host.clone(),
        server_time,
    };
    browse(&session, settings, query, status).await
}

async fn browse<S: Session>(
    session: &S,
    settings: &Settings,
    query: &PageQuery,
    status: ConnectionStatus,
) -> PageContext {
    let tables = session.list_tables(&settings.schema).await;
    if let Err(e) = &tables {
        tracing::warn!(schema = %settings.schema, "listing tables failed: {}", e);
    }

    let selected = selected_table(query);
    let table = selected
        .as_deref()
        .and_then(|name| match Identifier::parse(name) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::debug!("ignoring selection: {}", e);
                None
            }
        });

    let rows = match &table {
        Some(table) => {
            let rows = db::fetch_rows(session, table).await;
            if let Err(e) = &rows {
                tracing::warn!(%table, "row query failed: {}", e);
            }
            Some(rows)
        }
        None => None,
    };

    let demo = if settings.unsafe_demo_enabled() {
        Some(
            demo::run_demo(
                session,
                &settings.schema,
                selected.as_deref(),
                table.as_ref(),
                raw_filter(query),
            )
            .await,
        )
    } else {
        None
    };

    PageContext {
        schema: settings.schema.clone(),
        status,
        tables,
        selected,
        rows,
        demo,
    }
}
