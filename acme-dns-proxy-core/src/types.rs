//! Request and challenge types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dns01::to_fqdn;
use crate::error::CoreError;

/// One DNS-01 proof obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Domain being validated, in canonical (trailing-dot) form.
    pub fqdn: String,
    /// TXT record value, already encoded by the ACME client.
    pub encoded_key_auth: String,
}

impl Challenge {
    /// Build a challenge, normalizing `fqdn` to canonical form.
    pub fn new(fqdn: &str, encoded_key_auth: impl Into<String>) -> Self {
        Self {
            fqdn: to_fqdn(fqdn),
            encoded_key_auth: encoded_key_auth.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.fqdn.is_empty() {
            return Err(CoreError::Validation("fqdn not set".to_string()));
        }
        if self.encoded_key_auth.is_empty() {
            return Err(CoreError::Validation("key auth value not set".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Present,
    Cleanup,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    /// Case-insensitive; surrounding slashes are ignored so URL paths parse directly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches('/').to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "cleanup" => Ok(Self::Cleanup),
            _ => Err(CoreError::Validation(format!("unknown action {s:?}"))),
        }
    }
}

/// Who sent the request. Used for logging only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Remote {
    /// Peer address as seen by the transport.
    pub address: String,
    /// Self-reported client name (e.g. the User-Agent), if any.
    pub client_name: String,
}

/// One inbound present/cleanup call.
#[derive(Debug, Clone)]
pub struct Request {
    pub action: Action,
    pub auth_token: String,
    pub challenge: Challenge,
    pub remote: Remote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_is_canonical() {
        let c = Challenge::new("foo.example.com", "abc");
        assert_eq!(c.fqdn, "foo.example.com.");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn challenge_validation_messages() {
        let err = Challenge::new("", "abc").validate().unwrap_err();
        assert_eq!(err.to_string(), "validation error: fqdn not set");

        let err = Challenge::new("foo.example.com", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "validation error: key auth value not set");
    }

    #[test]
    fn action_parsing() {
        assert_eq!("present".parse::<Action>().unwrap(), Action::Present);
        assert_eq!("/CleanUp/".parse::<Action>().unwrap(), Action::Cleanup);
        assert!(matches!(
            "delete".parse::<Action>(),
            Err(CoreError::Validation(_))
        ));
    }
}
