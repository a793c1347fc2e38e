//! `DNSPod` HTTP request helper

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{DNSPOD_API_HOST, DNSPOD_VERSION, DnspodVendor, TencentResponse};

impl DnspodVendor {
    /// Call a Tencent Cloud API action and return its payload.
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload =
            serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;

        let timestamp = Utc::now().timestamp();
        let authorization = self.sign(action, &payload, timestamp);

        let request = self
            .client
            .post(format!("https://{DNSPOD_API_HOST}"))
            .header("Content-Type", "application/json; charset=utf-8")
            .header("Host", DNSPOD_API_HOST)
            .header("X-TC-Action", action)
            .header("X-TC-Version", DNSPOD_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("Authorization", authorization)
            .body(payload);

        let response =
            HttpUtils::execute_request(request, self.provider_name(), "POST", action).await?;

        let tc_response: TencentResponse<T> =
            HttpUtils::parse_json(&response.body, self.provider_name())?;
        let envelope = tc_response.response;

        if let Some(error) = envelope.error {
            log::warn!(
                "[dnspod] {action} rejected: {} - {} (request {})",
                error.code,
                error.message,
                envelope.request_id.as_deref().unwrap_or("-")
            );
            return Err(self.map_error(RawApiError::with_code(error.code, error.message), ctx));
        }
        if !response.is_success() {
            log::warn!("[dnspod] {action} failed with HTTP {}", response.status);
            return Err(self.map_error(RawApiError::new(format!("HTTP {}", response.status)), ctx));
        }

        envelope
            .data
            .ok_or_else(|| self.parse_error(format!("{action}: missing data in response")))
    }
}
