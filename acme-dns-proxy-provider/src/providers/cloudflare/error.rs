//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareVendor;

/// Reference: <https://api.cloudflare.com/#getting-started-responses>
impl ProviderErrorMapper for CloudflareVendor {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // 6003: Invalid request headers
            // 6111: Invalid format for Authorization header
            // 9109: Unauthorized to access requested resource
            // 10000: Authentication error
            Some("6003" | "6111" | "9109" | "10000") => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // 10001: token lacks the permission for this zone or endpoint
            Some("10001") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // 1004: DNS Validation Error
            // 9000: Invalid or missing name
            // 9021: Invalid TTL
            Some(code @ ("1004" | "9000" | "9021")) => ProviderError::InvalidParameter {
                provider,
                param: match code {
                    "9000" => "name",
                    "9021" => "ttl",
                    _ => "general",
                }
                .to_string(),
                detail: raw.message,
            },

            // 81057: The record already exists
            // 81058: A record with those settings already exists
            Some("81057" | "81058") => ProviderError::RecordExists {
                provider,
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 81044: Record does not exist
            Some("81044") => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 81045: The record quota has been exceeded
            Some("81045") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // 7000: No route for that URI
            // 7003: Could not route to /path, object identifier is invalid
            Some("7000" | "7003") => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
