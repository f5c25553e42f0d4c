//! In-memory stand-ins for the database, used by unit tests.

use crate::db::{ConnectionInfo, Connector, RowSet, Session, TEXT_TYPES};
use crate::error::{BrowseError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct FakeSession {
    tables: Vec<String>,
    columns: HashMap<String, Vec<(String, String)>>,
    rows: RowSet,
    list_error: Option<BrowseError>,
    select_error: Option<BrowseError>,
    executed: Rc<RefCell<Vec<String>>>,
}

impl FakeSession {
    pub fn with_table(mut self, name: &str, columns: &[(&str, &str)]) -> Self {
        self.tables.push(name.to_string());
        self.columns.insert(
            name.to_string(),
            columns
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string()))
                .collect(),
        );
        self
    }

    pub fn with_rows(mut self, rows: RowSet) -> Self {
        self.rows = rows;
        self
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(BrowseError::Query(message.to_string()));
        self
    }

    pub fn failing_selects(mut self, message: &str) -> Self {
        self.select_error = Some(BrowseError::Query(message.to_string()));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl Session for FakeSession {
    async fn server_time(&self) -> Result<String> {
        Ok("2024-05-01 12:00:00+00".to_string())
    }

    async fn list_tables(&self, _schema: &str) -> Result<Vec<String>> {
        if let Some(e) = &self.list_error {
            return Err(e.clone());
        }
        let mut tables = self.tables.clone();
        tables.sort();
        Ok(tables)
    }

    async fn first_text_column(&self, _schema: &str, table: &str) -> Result<Option<String>> {
        Ok(self.columns.get(table).and_then(|cols| {
            cols.iter()
                .find(|(_, ty)| TEXT_TYPES.contains(&ty.as_str()))
                .map(|(name, _)| name.clone())
        }))
    }

    async fn first_column_any(&self, _schema: &str, table: &str) -> Result<Option<String>> {
        Ok(self
            .columns
            .get(table)
            .and_then(|cols| cols.first())
            .map(|(name, _)| name.clone()))
    }

    async fn run_select(&self, sql: &str) -> Result<RowSet> {
        self.executed.borrow_mut().push(sql.to_string());
        match &self.select_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.rows.clone()),
        }
    }
}

pub struct FakeConnector {
    pub session: FakeSession,
    pub error: Option<BrowseError>,
    pub connects: Cell<usize>,
}

impl FakeConnector {
    pub fn new(session: FakeSession) -> Self {
        FakeConnector {
            session,
            error: None,
            connects: Cell::new(0),
        }
    }

    pub fn refusing(message: &str) -> Self {
        FakeConnector {
            session: FakeSession::default(),
            error: Some(BrowseError::Connection(message.to_string())),
            connects: Cell::new(0),
        }
    }
}

impl Connector for FakeConnector {
    type Session = FakeSession;

    async fn connect(&self, _info: &ConnectionInfo) -> Result<FakeSession> {
        self.connects.set(self.connects.get() + 1);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(self.session.clone()),
        }
    }
}
