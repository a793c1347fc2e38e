//! Shared types for vendor integrations.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// TTL (seconds) used for every DNS-01 challenge record.
pub const CHALLENGE_TTL: u32 = 60;

/// A TXT record to publish inside a zone.
///
/// `name` is relative to the zone (e.g. `_acme-challenge.www`), never fully qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecord {
    /// Record name relative to the zone apex. `@` or empty denotes the apex itself.
    pub name: String,
    /// TXT content.
    pub value: String,
    /// Time to live, in seconds.
    pub ttl: u32,
}

impl TxtRecord {
    /// Build a challenge record with the standard [`CHALLENGE_TTL`].
    pub fn challenge(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ttl: CHALLENGE_TTL,
        }
    }
}

// ============ Provider Types ============

/// Identifies which vendor implementation to use.
///
/// This is the closed registry of supported vendors; each variant is gated
/// behind its corresponding feature flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Cloudflare DNS. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    Cloudflare,
    /// Tencent Cloud `DNSPod`. Requires feature `dnspod`.
    #[cfg(feature = "dnspod")]
    Dnspod,
}

impl ProviderType {
    /// All vendors compiled into this build.
    pub const ALL: &'static [Self] = &[
        #[cfg(feature = "cloudflare")]
        Self::Cloudflare,
        #[cfg(feature = "dnspod")]
        Self::Dnspod,
    ];

    /// Registry key used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare => "cloudflare",
            #[cfg(feature = "dnspod")]
            Self::Dnspod => "dnspod",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a configuration string names no registered vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProviderType(pub String);

impl std::fmt::Display for UnknownProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "provider type not specified")
        } else {
            write!(f, "unsupported provider '{}'", self.0)
        }
    }
}

impl std::error::Error for UnknownProviderType {}

impl FromStr for ProviderType {
    type Err = UnknownProviderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| UnknownProviderType(s.to_string()))
    }
}

// ============ Credential Types ============

/// Validation error for vendor credentials.
///
/// Returned when a variable is missing or blank in the provider configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required variable is missing entirely.
    MissingField {
        /// Which vendor the error relates to.
        provider: ProviderType,
        /// Machine-readable variable key.
        field: String,
        /// Human-readable label.
        label: String,
    },
    /// A variable is present but empty/whitespace-only.
    EmptyField {
        /// Which vendor the error relates to.
        provider: ProviderType,
        /// Machine-readable variable key.
        field: String,
        /// Human-readable label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField {
                provider,
                field,
                label,
            } => write!(f, "{provider}: missing required variable '{field}' ({label})"),
            Self::EmptyField {
                provider,
                field,
                label,
            } => write!(f, "{provider}: variable '{field}' ({label}) must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported vendors.
///
/// Pass this to [`create_vendor()`](crate::create_vendor) to instantiate a vendor.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Cloudflare credentials. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token with `Zone:Read` and `DNS:Edit`.
        api_token: String,
    },

    /// Tencent Cloud `DNSPod` credentials. Requires feature `dnspod`.
    #[cfg(feature = "dnspod")]
    #[serde(rename = "dnspod")]
    Dnspod {
        /// Tencent Cloud Secret ID.
        secret_id: String,
        /// Tencent Cloud Secret Key.
        secret_key: String,
    },
}

// Secrets stay out of logs.
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("provider", &self.provider_type())
            .finish_non_exhaustive()
    }
}

impl ProviderCredentials {
    /// Construct credentials from the flat `variables` mapping of the provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required variable is missing or empty.
    pub fn from_map(
        provider: ProviderType,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            #[cfg(feature = "cloudflare")]
            ProviderType::Cloudflare => Ok(Self::Cloudflare {
                api_token: Self::get_required_field(provider, map, "apiToken", "API Token")?,
            }),
            #[cfg(feature = "dnspod")]
            ProviderType::Dnspod => Ok(Self::Dnspod {
                secret_id: Self::get_required_field(provider, map, "secretId", "Secret ID")?,
                secret_key: Self::get_required_field(provider, map, "secretKey", "Secret Key")?,
            }),
        }
    }

    /// Which vendor these credentials belong to.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => ProviderType::Cloudflare,
            #[cfg(feature = "dnspod")]
            Self::Dnspod { .. } => ProviderType::Dnspod,
        }
    }

    fn get_required_field(
        provider: ProviderType,
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }
}
