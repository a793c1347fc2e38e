use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::TxtRecord;

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code, format differs per vendor
    pub code: Option<String>,
    /// Raw error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra information available while mapping a raw error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name, for `RecordExists`
    pub record_name: Option<String>,
    /// Record ID, for `RecordNotFound`
    pub record_id: Option<String>,
    /// Zone, for `DomainNotFound` / `DomainLocked`
    pub domain: Option<String>,
}

/// Maps vendor-specific API errors onto [`ProviderError`] (internal).
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Fallback for codes that have no dedicated variant.
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A DNS hosting vendor able to publish and remove TXT records.
///
/// `zone` is always passed in canonical form with a trailing dot (`example.com.`);
/// implementations strip it where their API expects a bare name.
#[async_trait]
pub trait DnsVendor: Send + Sync {
    /// Vendor identifier, matches [`ProviderType`](crate::ProviderType) display form.
    fn id(&self) -> &'static str;

    /// Create `record` inside `zone` and return the vendor-assigned record ID.
    async fn append_record(&self, zone: &str, record: &TxtRecord) -> Result<String>;

    /// Delete the record identified by `record_id` from `zone`.
    async fn delete_record(&self, zone: &str, record_id: &str) -> Result<()>;
}
