//! Profile store adapter
//!
//! CRUD over the application-level `users` table. A profile row is keyed
//! by the identity provider's user id; the identity itself is referenced,
//! never copied.

use reqwest::Client;
use serde::Serialize;

use crate::error::Error;
use crate::models::{UserProfile, UserRole};
use crate::store::TableClient;

/// A profile row to insert
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    /// Must equal the id of the identity this profile belongs to
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Adapter for the `users` table
pub struct ProfileStore {
    table: TableClient,
}

impl ProfileStore {
    /// Create a new ProfileStore
    pub(crate) fn new(url: &str, key: &str, schema: &str, client: Client) -> Self {
        Self {
            table: TableClient::new(url, key, "users", schema, client),
        }
    }

    /// Insert a profile row
    ///
    /// Fails with a store conflict when a profile with that id already
    /// exists.
    pub async fn insert(&self, profile: NewProfile) -> Result<(), Error> {
        self.table.insert(profile).execute_no_return().await
    }

    /// Fetch the profile with the given id
    ///
    /// `None` means no row, which is not an error: an identity may exist
    /// without a profile until reconciliation catches up.
    pub async fn get(&self, id: &str) -> Result<Option<UserProfile>, Error> {
        self.table.select("*").eq("id", id).execute_one().await
    }
}
