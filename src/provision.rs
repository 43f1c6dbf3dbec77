//! Account provisioning flow
//!
//! Registering a user takes two remote steps that cannot be made atomic
//! across the network boundary: create the identity at the provider, then
//! insert the matching profile row in the data store. The flow chooses
//! availability over strict consistency: once the identity exists, a
//! failed profile insert is logged and the caller still gets the identity
//! back, leaving the row to a later reconciliation read.

use tracing::warn;

use crate::auth::{AccountIdentity, Auth, SignUpAttributes};
use crate::error::{Error, ValidationError};
use crate::models::{UserProfile, UserRole};
use crate::profiles::{NewProfile, ProfileStore};

/// Minimum password length accepted before contacting the provider
pub const MIN_PASSWORD_LEN: usize = 6;

/// Input for one registration attempt
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub role: UserRole,
}

impl Registration {
    /// Validate the input locally
    ///
    /// Runs before any remote call; a violation names the offending field
    /// and no network traffic is produced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::new("full_name", "full name is required"));
        }

        if self.password != self.confirm_password {
            return Err(ValidationError::new(
                "confirm_password",
                "passwords do not match",
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        Ok(())
    }
}

/// Orchestrates the identity provider and the profile store into a single
/// logical "register a user" operation
pub struct Provisioner<'a> {
    auth: &'a Auth,
    profiles: ProfileStore,
}

impl<'a> Provisioner<'a> {
    /// Create a new Provisioner
    pub(crate) fn new(auth: &'a Auth, profiles: ProfileStore) -> Self {
        Self { auth, profiles }
    }

    /// Register a new user
    ///
    /// Steps, strictly in order:
    /// 1. local validation; a violation aborts with zero remote calls
    /// 2. identity creation; a provider error aborts, and the profile
    ///    insert is never attempted
    /// 3. profile insert with the identity's id; a failure here is logged
    ///    as a warning and does not abort
    ///
    /// Returns the created identity on every path that reaches step 3.
    /// Retrying a registration whose identity already exists fails with a
    /// conflict from the provider; there is no automatic resume at the
    /// profile insert.
    pub async fn register(&self, registration: Registration) -> Result<AccountIdentity, Error> {
        registration.validate()?;

        let attributes = SignUpAttributes {
            full_name: registration.full_name.clone(),
            role: registration.role,
        };

        let response = self
            .auth
            .sign_up(&registration.email, &registration.password, attributes)
            .await?;

        let identity = response.identity;

        let profile = NewProfile {
            id: identity.id.clone(),
            email: registration.email,
            full_name: registration.full_name,
            role: registration.role,
        };

        if let Err(err) = self.profiles.insert(profile).await {
            // The identity exists; the row can be recreated on a later
            // authenticated read.
            warn!(
                identity = %identity.id,
                error = %err,
                "profile insert failed after identity creation"
            );
        }

        Ok(identity)
    }

    /// Fetch the profile of the currently authenticated viewer
    ///
    /// `None` when no one is signed in, and also when the viewer's
    /// identity has no profile row yet.
    pub async fn current_profile(&self) -> Result<Option<UserProfile>, Error> {
        if self.auth.current_session().is_none() {
            return Ok(None);
        }

        let identity = self.auth.current_user().await?;
        self.profiles.get(&identity.id).await
    }
}
