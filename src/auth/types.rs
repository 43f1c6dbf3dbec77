//! Types for authentication and identity management

use serde::{Deserialize, Serialize};

use crate::auth::session::Session;
use crate::models::UserRole;

/// An account as issued by the identity provider
///
/// The provider owns this record; the application references it by id and
/// never mutates it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountIdentity {
    /// Opaque id assigned by the provider
    pub id: String,

    pub email: Option<String>,

    /// Free-form attributes attached at sign-up
    #[serde(default)]
    pub user_metadata: serde_json::Value,

    /// Set once the email address has been confirmed
    pub email_confirmed_at: Option<String>,

    pub created_at: Option<String>,

    pub updated_at: Option<String>,

    /// Provider-side role, not the application role
    pub role: Option<String>,
}

/// Attributes attached to a new identity at sign-up
///
/// Travel as provider user metadata so the profile row can be reconciled
/// from the identity alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpAttributes {
    pub full_name: String,
    pub role: UserRole,
}

/// Result of a sign-up call
///
/// The provider answers with a full session when the project allows
/// immediate sign-in, and with a bare identity when email confirmation is
/// still pending. The adapter does not block on confirmation.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    /// The created identity, with a populated id on every success path
    pub identity: AccountIdentity,

    /// Present only when the identity is already active
    pub session: Option<Session>,
}

/// Wire shape of the sign-up response
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignUpPayload {
    WithSession(Session),
    IdentityOnly(AccountIdentity),
}

impl From<SignUpPayload> for AuthResponse {
    fn from(payload: SignUpPayload) -> Self {
        match payload {
            SignUpPayload::WithSession(session) => Self {
                identity: session.user.clone(),
                session: Some(session),
            },
            SignUpPayload::IdentityOnly(identity) => Self {
                identity,
                session: None,
            },
        }
    }
}
