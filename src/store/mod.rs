//! Data store operations through a PostgREST-compatible API

mod query;

use reqwest::Client;
use serde::Serialize;

use crate::error::{Error, StoreError};
use crate::fetch::FetchError;

pub use query::*;

/// Client for CRUD operations on one table or view
pub struct TableClient {
    /// The base URL for the backend project
    url: String,

    /// The anonymous API key for the backend project
    key: String,

    /// The table or view name
    table: String,

    /// The database schema the table lives in
    schema: String,

    /// HTTP client
    client: Client,
}

impl TableClient {
    /// Create a new TableClient
    pub(crate) fn new(url: &str, key: &str, table: &str, schema: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            table: table.to_string(),
            schema: schema.to_string(),
            client,
        }
    }

    /// Get the base URL for REST API requests
    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.schema.clone(),
            columns,
            self.client.clone(),
        )
    }

    /// Insert a row into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.schema.clone(),
            values,
            self.client.clone(),
        )
    }

    /// Count rows in the table without fetching them
    pub fn count(&self) -> CountBuilder {
        CountBuilder::new(
            self.rest_url(),
            self.key.clone(),
            self.schema.clone(),
            self.client.clone(),
        )
    }
}

pub(crate) fn map_fetch(err: FetchError) -> Error {
    match err {
        FetchError::Rejected { status, body } => Error::Store(map_rejection(status, &body)),
        other => Error::Store(StoreError::Unavailable(other.to_string())),
    }
}

fn map_rejection(status: u16, body: &str) -> StoreError {
    match status {
        409 => StoreError::Conflict(body.trim().to_string()),
        404 | 406 => StoreError::NotFound,
        _ => StoreError::Unavailable(format!("status {}: {}", status, body)),
    }
}
