use super::connection::{self, ConnectionInfo};
use super::introspection;
use super::query::{self, RowSet};
use crate::error::Result;
use tokio_postgres::Client;

/// Everything a page load asks of the database. The request flow only talks
/// to this trait, so it can be driven by an in-memory fake in tests.
#[allow(async_fn_in_trait)]
pub trait Session {
    async fn server_time(&self) -> Result<String>;

    async fn list_tables(&self, schema: &str) -> Result<Vec<String>>;

    async fn first_text_column(&self, schema: &str, table: &str) -> Result<Option<String>>;

    async fn first_column_any(&self, schema: &str, table: &str) -> Result<Option<String>>;

    /// Executes one read-only statement and returns at most
    /// [`query::ROW_LIMIT`] rows.
    async fn run_select(&self, sql: &str) -> Result<RowSet>;
}

#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session: Session;

    async fn connect(&self, info: &ConnectionInfo) -> Result<Self::Session>;
}

/// Opens a fresh PostgreSQL connection per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

pub struct PgSession {
    client: Client,
}

impl Connector for PgConnector {
    type Session = PgSession;

    async fn connect(&self, info: &ConnectionInfo) -> Result<PgSession> {
        let client = connection::connect(info).await?;
        Ok(PgSession { client })
    }
}

impl Session for PgSession {
    async fn server_time(&self) -> Result<String> {
        introspection::server_time(&self.client).await
    }

    async fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        introspection::list_tables(&self.client, schema).await
    }

    async fn first_text_column(&self, schema: &str, table: &str) -> Result<Option<String>> {
        introspection::first_text_column(&self.client, schema, table).await
    }

    async fn first_column_any(&self, schema: &str, table: &str) -> Result<Option<String>> {
        introspection::first_column_any(&self.client, schema, table).await
    }

    async fn run_select(&self, sql: &str) -> Result<RowSet> {
        query::run_read_only(&self.client, sql).await
    }
}
