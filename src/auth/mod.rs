//! Identity provider adapter
//!
//! Wraps sign-up, sign-in, sign-out, and session retrieval against a
//! GoTrue-compatible auth service. The in-process session cell is the
//! single source of truth for who the authenticated viewer is; it is
//! cleared on sign-out.

mod session;
mod types;

use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::ClientOptions;
use crate::error::{AuthError, Error};
use crate::fetch::{Fetch, FetchError};

pub use session::*;
pub use types::*;

/// Client for the identity provider
pub struct Auth {
    /// The base URL for the backend project
    url: String,

    /// The anonymous API key for the backend project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,

    /// Client options
    options: ClientOptions,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpAttributes,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
            options,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Create a new identity with email and password
    ///
    /// The attributes travel as provider user metadata. The provider may
    /// require an out-of-band email confirmation before the identity is
    /// fully active; this call does not block on it. Duplicate emails
    /// surface as [`AuthError::Conflict`], transport failures as
    /// [`AuthError::Unavailable`].
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attributes: SignUpAttributes,
    ) -> Result<AuthResponse, Error> {
        let url = self.auth_url("/signup");

        let body = SignUpRequest {
            email,
            password,
            data: &attributes,
        };

        let mut query = HashMap::new();
        if let Some(ref redirect) = self.options.email_redirect_to {
            query.insert("redirect_to".to_string(), redirect.clone());
        }

        let payload = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .query(query)
            .json(&body)?
            .execute::<SignUpPayload>()
            .await
            .map_err(map_fetch)?;

        let result = AuthResponse::from(payload);

        // Store session if one was returned
        if let Some(ref session) = result.session {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session.clone());
        }

        Ok(result)
    }

    /// Sign in with email and password
    ///
    /// Maps a credential mismatch to [`AuthError::InvalidCredentials`] and
    /// a pending confirmation to [`AuthError::Unconfirmed`].
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.auth_url("/token?grant_type=password");

        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let session = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .json(&body)?
            .execute::<Session>()
            .await
            .map_err(map_fetch)?;

        {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session.clone());
        }

        Ok(session)
    }

    /// Sign out the current viewer
    ///
    /// Idempotent: returns `Ok` when no session is held, and treats a
    /// provider rejection of the token as already signed out. Only a
    /// transport or server failure errors.
    pub async fn sign_out(&self) -> Result<(), Error> {
        let token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.access_token.clone(),
                None => return Ok(()),
            }
        };

        let url = self.auth_url("/logout");

        let result = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .bearer_auth(&token)
            .execute_raw()
            .await;

        match result {
            Ok(_) => {}
            // The token was already revoked or expired server-side
            Err(FetchError::Rejected { status, .. }) if status < 500 => {}
            Err(err) => return Err(map_fetch(err)),
        }

        let mut current_session = self.session.lock().unwrap();
        *current_session = None;

        Ok(())
    }

    /// Fetch the identity of the currently authenticated viewer
    pub async fn current_user(&self) -> Result<AccountIdentity, Error> {
        let token = self
            .access_token()
            .ok_or(AuthError::MissingSession)?;

        let url = self.auth_url("/user");

        let user = Fetch::get(&self.client, &url)
            .header("apikey", &self.key)
            .bearer_auth(&token)
            .execute::<AccountIdentity>()
            .await
            .map_err(map_fetch)?;

        Ok(user)
    }

    /// Get the current session, if one is held and not expired
    pub fn current_session(&self) -> Option<Session> {
        let current_session = self.session.lock().unwrap();
        current_session
            .as_ref()
            .filter(|session| !session.is_expired())
            .cloned()
    }

    /// Set the session, e.g. one restored from persistent storage
    pub fn set_session(&self, session: Session) {
        let mut current_session = self.session.lock().unwrap();
        *current_session = Some(session);
    }

    fn access_token(&self) -> Option<String> {
        let current_session = self.session.lock().unwrap();
        current_session
            .as_ref()
            .map(|session| session.access_token.clone())
    }
}

fn map_fetch(err: FetchError) -> Error {
    match err {
        FetchError::Rejected { status, body } => Error::Auth(map_rejection(status, &body)),
        other => Error::Auth(AuthError::Unavailable(other.to_string())),
    }
}

/// Map a provider rejection to the auth error taxonomy
///
/// GoTrue reports most credential problems as 400/401/422 with the reason
/// in the body, so the body text has to disambiguate.
fn map_rejection(status: u16, body: &str) -> AuthError {
    let lower = body.to_ascii_lowercase();

    if status == 409 || lower.contains("already registered") || lower.contains("already exists") {
        AuthError::Conflict(body.trim().to_string())
    } else if lower.contains("not confirmed") {
        AuthError::Unconfirmed
    } else if matches!(status, 400 | 401 | 403 | 422) {
        AuthError::InvalidCredentials
    } else {
        AuthError::Unavailable(format!("status {}: {}", status, body))
    }
}
