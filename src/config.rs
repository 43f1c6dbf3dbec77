//! Configuration options for the LexFlow client

use std::time::Duration;

/// Configuration options for the LexFlow client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema served by the data store
    pub db_schema: String,

    /// URL the identity provider redirects to after email confirmation
    pub email_redirect_to: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
            email_redirect_to: None,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the post-confirmation redirect URL sent with sign-up requests
    pub fn with_email_redirect_to(mut self, value: &str) -> Self {
        self.email_redirect_to = Some(value.to_string());
        self
    }
}
