//! Status enums for stateful containers.

use serde::{Deserialize, Serialize};

/// Session container state.
///
/// `Anonymous -> Authenticating -> Authenticated`, and back to `Anonymous`
/// on logout. `Authenticating` only lasts while an identity provider call is
/// in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticating => write!(f, "authenticating"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anonymous" => Ok(Self::Anonymous),
            "authenticating" => Ok(Self::Authenticating),
            "authenticated" => Ok(Self::Authenticated),
            _ => Err(format!("invalid session status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(SessionStatus::default(), SessionStatus::Anonymous);
    }

    #[test]
    fn test_display_from_str_agree() {
        for status in [
            SessionStatus::Anonymous,
            SessionStatus::Authenticating,
            SessionStatus::Authenticated,
        ] {
            assert_eq!(status.to_string().parse::<SessionStatus>().unwrap(), status);
        }
        assert!("admin".parse::<SessionStatus>().is_err());
    }
}
