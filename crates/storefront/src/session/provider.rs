//! Identity provider seam.
//!
//! The session container only checks that inputs are present and stores
//! the result. Deciding who the user is belongs to an [`IdentityProvider`];
//! the storefront ships a mock that accepts every request that gets that far.

use std::future::Future;
use std::time::Duration;

use secrecy::SecretString;

use wishshop_core::{Email, User, UserId};

use super::SessionError;

/// Placeholder avatar handed out by the mock provider.
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=40&width=40";

/// Id given to every mock identity. A real provider must supply unique ids.
pub const MOCK_USER_ID: &str = "1";

/// Resolves validated credentials to a user identity.
///
/// Inputs have already passed validation when these are called.
pub trait IdentityProvider: Send + Sync {
    /// Authenticate an existing account.
    fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<User, SessionError>> + Send;

    /// Create an account and return its identity.
    fn register(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<User, SessionError>> + Send;
}

/// Non-cryptographic stand-in provider.
///
/// Never checks passwords. Login names the user after the email's local
/// part; register uses the given name. Both use [`MOCK_USER_ID`].
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    latency: Duration,
}

impl MockIdentityProvider {
    /// A provider that answers immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a network round-trip of `latency` per call.
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn identity(name: &str, email: &Email) -> User {
        User {
            id: UserId::new(MOCK_USER_ID),
            name: name.to_owned(),
            email: email.clone(),
            avatar: Some(PLACEHOLDER_AVATAR.to_owned()),
        }
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, email: &Email, _password: &SecretString) -> Result<User, SessionError> {
        self.round_trip().await;
        Ok(Self::identity(email.local_part(), email))
    }

    async fn register(
        &self,
        name: &str,
        email: &Email,
        _password: &SecretString,
    ) -> Result<User, SessionError> {
        self.round_trip().await;
        Ok(Self::identity(name, email))
    }
}
