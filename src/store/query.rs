//! Query builders for TableClient

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::{Error, StoreError};
use crate::fetch::Fetch;
use crate::store::map_fetch;

/// Base query builder
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Query parameters
    params: HashMap<String, String>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the query
    pub fn add_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    key: String,
    schema: String,
    client: Client,
    query: QueryBuilder,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub(crate) fn new(url: String, key: String, schema: String, columns: &str, client: Client) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            key,
            schema,
            client,
            query,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(&mut self, column: &str, value: T) -> &mut Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Order the results by a column
    pub fn order(&mut self, column: &str, ascending: bool) -> &mut Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.query.add_param("order", &format!("{}.{}", column, direction));
        self
    }

    /// Limit the number of rows returned
    pub fn limit(&mut self, count: i32) -> &mut Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let result = Fetch::get(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("Accept-Profile", &self.schema)
            .query(self.query.get_params().clone())
            .execute::<Vec<T>>()
            .await
            .map_err(map_fetch)?;

        Ok(result)
    }

    /// Execute the query and return the first row, `None` when no row matches
    pub async fn execute_one<T: DeserializeOwned>(&mut self) -> Result<Option<T>, Error> {
        self.limit(1);

        let results = self.execute::<T>().await?;
        Ok(results.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    url: String,
    key: String,
    schema: String,
    values: T,
    client: Client,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub(crate) fn new(url: String, key: String, schema: String, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            schema,
            values,
            client,
        }
    }

    /// Execute the query and return the inserted rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<R, Error> {
        let result = Fetch::post(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("Content-Profile", &self.schema)
            .header("Prefer", "return=representation")
            .json(&self.values)?
            .execute::<R>()
            .await
            .map_err(map_fetch)?;

        Ok(result)
    }

    /// Execute the query without returning the inserted data
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        Fetch::post(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("Content-Profile", &self.schema)
            .header("Prefer", "return=minimal")
            .json(&self.values)?
            .execute_raw()
            .await
            .map_err(map_fetch)?;

        Ok(())
    }
}

/// Builder for scalar count queries
///
/// Issues a HEAD request with `Prefer: count=exact` and reads the total
/// from the `Content-Range` response header, so no rows travel.
pub struct CountBuilder {
    url: String,
    key: String,
    schema: String,
    client: Client,
    query: QueryBuilder,
}

impl CountBuilder {
    /// Create a new CountBuilder
    pub(crate) fn new(url: String, key: String, schema: String, client: Client) -> Self {
        Self {
            url,
            key,
            schema,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Count only rows where column equals a value
    pub fn eq<T: ToString>(&mut self, column: &str, value: T) -> &mut Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Execute the query and return the row count
    pub async fn execute(&self) -> Result<u64, Error> {
        let response = Fetch::head(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("Accept-Profile", &self.schema)
            .header("Prefer", "count=exact")
            .query(self.query.get_params().clone())
            .execute_raw()
            .await
            .map_err(map_fetch)?;

        // Content-Range is "<from>-<to>/<total>", or "*/<total>" for an
        // empty range
        let total = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.rsplit('/').next())
            .and_then(|total| total.parse::<u64>().ok());

        match total {
            Some(total) => Ok(total),
            None => Err(StoreError::Unavailable(
                "count response carried no Content-Range total".to_string(),
            )
            .into()),
        }
    }
}
