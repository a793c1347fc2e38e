//! Shared HTTP plumbing for vendor clients.
//!
//! Each vendor builds its own signed `RequestBuilder`; this module sends it,
//! classifies transport-level failures and logs a truncated response body.
//! Nothing here retries: a failed vendor call is reported to the ACME client as-is.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Response status and body of a completed vendor call.
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct HttpUtils;

impl HttpUtils {
    /// Send a prepared request.
    ///
    /// `label` is used for logging only (URL path or API action name).
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502-504 become
    /// [`ProviderError::NetworkError`]; every other status is returned to the
    /// caller, which knows how to read the vendor's error envelope.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        label: &str,
    ) -> Result<RawResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {label}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| send_error(provider_name, &e))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] HTTP {status}: {}",
            truncate_for_log(&body)
        );

        match status {
            429 => {
                log::warn!("[{provider_name}] rate limited, retry_after={retry_after:?}");
                Err(ProviderError::RateLimited {
                    provider: provider_name.to_string(),
                    retry_after,
                    raw_message: Some(truncate_for_log(&body).into_owned()),
                })
            }
            502..=504 => Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            }),
            _ => Ok(RawResponse { status, body }),
        }
    }

    /// Deserialize a JSON response body, mapping failures to [`ProviderError::ParseError`].
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider_name}] unparseable response ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn send_error(provider_name: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    }
}
