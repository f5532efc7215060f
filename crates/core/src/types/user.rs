//! Logged-in user identity.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The single active user of a client run.
///
/// This is the whole session record: it is what gets persisted and
/// rehydrated on the next start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
