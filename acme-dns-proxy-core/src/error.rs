//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use acme_dns_proxy_provider::{CredentialValidationError, ProviderError, UnknownProviderType};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    // ============ Configuration (fatal at startup) ============
    /// An ACL pattern failed to compile
    #[error("invalid pattern {pattern:?}: {detail}")]
    InvalidPattern { pattern: String, detail: String },

    /// The ACL has no rules
    #[error("no access rules defined")]
    EmptyRuleSet,

    /// An ACL rule has an empty token
    #[error("rule {pattern:?}: 'token' not specified")]
    MissingToken { pattern: String },

    /// The configured provider type is not in the registry
    #[error("{0}")]
    UnknownProvider(String),

    /// Provider variables are missing or malformed
    #[error("provider configuration: {0}")]
    ProviderConfig(String),

    // ============ Request ============
    /// Malformed request
    #[error("validation error: {0}")]
    Validation(String),

    /// No ACL rule matches the requested domain
    #[error("no access rule matches {0}")]
    NotFound(String),

    /// A rule matched but the token did not
    #[error("access denied")]
    AccessDenied,

    /// Cleanup for a key authorization with no record from a prior present
    #[error("no pending record found for {0}")]
    NoPendingRecord(String),

    /// The SOA walk found no zone
    #[error("could not find zone for {fqdn}: {detail}")]
    ZoneResolution { fqdn: String, detail: String },

    /// Vendor API failure
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the failure was caused by the caller or the configuration rather than
    /// by a dependency. Callers log `true` at `warn` and `false` at `error`.
    ///
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::NotFound(_)
            | Self::AccessDenied
            | Self::NoPendingRecord(_)
            | Self::InvalidPattern { .. }
            | Self::EmptyRuleSet
            | Self::MissingToken { .. }
            | Self::UnknownProvider(_)
            | Self::ProviderConfig(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::ZoneResolution { .. } => false,
        }
    }

    /// Rejections that must look identical to an unauthenticated caller.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::AccessDenied
        )
    }

    /// Short machine-readable kind, used as the `outcome` of a request log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::EmptyRuleSet => "empty_rule_set",
            Self::MissingToken { .. } => "missing_token",
            Self::UnknownProvider(_) => "unknown_provider",
            Self::ProviderConfig(_) => "provider_config",
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::AccessDenied => "access_denied",
            Self::NoPendingRecord(_) => "no_pending_record",
            Self::ZoneResolution { .. } => "zone_resolution_error",
            Self::Provider(_) => "provider_error",
        }
    }
}

impl From<CredentialValidationError> for CoreError {
    fn from(e: CredentialValidationError) -> Self {
        Self::ProviderConfig(e.to_string())
    }
}

impl From<UnknownProviderType> for CoreError {
    fn from(e: UnknownProviderType) -> Self {
        Self::UnknownProvider(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
