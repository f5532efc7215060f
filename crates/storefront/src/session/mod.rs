//! Session container.
//!
//! Holds at most one logged-in [`User`] for the client run and keeps it in
//! the persistent store under [`SESSION_KEY`].
//!
//! # States
//!
//! ```text
//! Anonymous ──login/register──▶ Authenticating ──ok──▶ Authenticated
//!     ▲                               │                     │
//!     │                          rejected: back to          │
//!     │                          previous state             │
//!     └─────────────────────────logout──────────────────────┘
//! ```
//!
//! Login while authenticated replaces the current user. A login future that
//! is dropped before completing leaves the container in `Authenticating`.

mod error;
mod provider;

pub use error::{SessionError, ValidationError};
pub use provider::{IdentityProvider, MOCK_USER_ID, MockIdentityProvider, PLACEHOLDER_AVATAR};

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use wishshop_core::{Email, SessionStatus, User};

use crate::store::{JsonStore, PersistenceError, SESSION_KEY};

/// Minimum password length accepted by login and register.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The process-wide session state.
#[derive(Debug)]
pub struct SessionContainer<P = MockIdentityProvider> {
    provider: P,
    store: JsonStore,
    status: SessionStatus,
    user: Option<User>,
}

impl<P: IdentityProvider> SessionContainer<P> {
    /// Create the container and rehydrate any persisted session.
    ///
    /// A missing record starts `Anonymous`. A corrupt record also starts
    /// `Anonymous` and is deleted so it is not re-read on every start.
    pub fn new(store: JsonStore, provider: P) -> Self {
        let user = match store.try_load::<User>(SESSION_KEY) {
            Ok(user) => user,
            Err(e @ PersistenceError::Serialization { .. }) => {
                warn!(error = %e, "Corrupt session record, starting logged out");
                store.remove(SESSION_KEY);
                None
            }
            Err(e) => {
                warn!(error = %e, "Session store unreadable, starting logged out");
                None
            }
        };

        let status = if user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };

        Self {
            provider,
            store,
            status,
            user,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` if the email is blank or the
    /// password is shorter than [`MIN_PASSWORD_LENGTH`], and
    /// `SessionError::Rejected` if the provider refuses the credentials.
    pub async fn login(
        &mut self,
        email: &str,
        password: &SecretString,
    ) -> Result<&User, SessionError> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        validate_password(password)?;

        let previous = self.begin();
        let result = self.provider.login(&email, password).await;
        self.finish(previous, result)
    }

    /// Create an account and log in as it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` if the name is empty, the email is
    /// blank or the password is too short, and `SessionError::Rejected`
    /// if the provider refuses the registration.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<&User, SessionError> {
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        let email = Email::parse(email).map_err(ValidationError::from)?;
        validate_password(password)?;

        let previous = self.begin();
        let result = self.provider.register(name, &email, password).await;
        self.finish(previous, result)
    }

    /// Log out. Always succeeds, even when already anonymous.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "User logged out");
        }
        self.status = SessionStatus::Anonymous;
        self.store.remove(SESSION_KEY);
    }

    fn begin(&mut self) -> SessionStatus {
        std::mem::replace(&mut self.status, SessionStatus::Authenticating)
    }

    fn finish(
        &mut self,
        previous: SessionStatus,
        result: Result<User, SessionError>,
    ) -> Result<&User, SessionError> {
        match result {
            Ok(user) => {
                self.store.save(SESSION_KEY, &user);
                info!(user_id = %user.id, email = %user.email, "User authenticated");
                self.status = SessionStatus::Authenticated;
                Ok(&*self.user.insert(user))
            }
            Err(e) => {
                warn!(error = %e, "Authentication failed");
                self.status = previous;
                Err(e)
            }
        }
    }
}

fn validate_password(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
