//! LexFlow client core
//!
//! Rust client core for the LexFlow legal practice management platform:
//! authentication, account provisioning, user profiles, and the dashboard
//! read side, against a Supabase-compatible backend (GoTrue auth under
//! `/auth/v1`, PostgREST CRUD under `/rest/v1`).

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod profiles;
pub mod provision;
pub mod store;

mod fetch;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::dashboard::Dashboard;
use crate::profiles::ProfileStore;
use crate::provision::Provisioner;
use crate::store::TableClient;

/// The main entry point for the LexFlow client
pub struct LexFlow {
    /// The base URL for the backend project
    pub url: String,

    /// The anonymous API key for the backend project
    pub key: String,

    /// HTTP client used for requests
    pub http_client: Client,

    /// Auth client for identity management and authentication
    pub auth: Auth,

    /// Client options
    pub options: ClientOptions,
}

impl LexFlow {
    /// Create a new LexFlow client
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL for your backend project
    /// * `key` - The anonymous API key for your backend project
    ///
    /// # Example
    ///
    /// ```
    /// use lexflow::LexFlow;
    ///
    /// let lexflow = LexFlow::new("https://your-project-url.example.co", "your-anon-key");
    /// ```
    pub fn new(url: &str, key: &str) -> Self {
        Self::new_with_options(url, key, ClientOptions::default())
    }

    /// Create a new LexFlow client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use lexflow::{LexFlow, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_email_redirect_to("https://app.example.co/dashboard");
    /// let lexflow = LexFlow::new_with_options(
    ///     "https://your-project-url.example.co",
    ///     "your-anon-key",
    ///     options,
    /// );
    /// ```
    pub fn new_with_options(url: &str, key: &str, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|_| Client::new());

        let auth = Auth::new(url, key, http_client.clone(), options.clone());

        Self {
            url: url.to_string(),
            key: key.to_string(),
            http_client,
            auth,
            options,
        }
    }

    /// Get a reference to the auth client for identity management and
    /// authentication
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a new TableClient for CRUD operations on a specific table or
    /// view
    ///
    /// # Example
    ///
    /// ```
    /// use lexflow::LexFlow;
    ///
    /// let lexflow = LexFlow::new("https://your-project-url.example.co", "your-anon-key");
    /// let query = lexflow.from("processes");
    /// ```
    pub fn from(&self, table: &str) -> TableClient {
        TableClient::new(
            &self.url,
            &self.key,
            table,
            &self.options.db_schema,
            self.http_client.clone(),
        )
    }

    /// Get the profile store adapter for the `users` table
    pub fn profiles(&self) -> ProfileStore {
        ProfileStore::new(
            &self.url,
            &self.key,
            &self.options.db_schema,
            self.http_client.clone(),
        )
    }

    /// Get the account provisioning flow
    pub fn provisioner(&self) -> Provisioner<'_> {
        Provisioner::new(&self.auth, self.profiles())
    }

    /// Get the read-side client for the dashboard queries
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            &self.url,
            &self.key,
            &self.options.db_schema,
            self.http_client.clone(),
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::LexFlow;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
}
