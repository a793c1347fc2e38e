//! Cloudflare HTTP request helpers

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareResponse, CloudflareVendor};

impl CloudflareVendor {
    /// Send an authenticated request and unwrap the v4 envelope.
    ///
    /// `context` is attached to any API error so that e.g. a missing record
    /// can name the record ID it was asked about.
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: ErrorContext,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = format!("{CF_API_BASE}{path}");
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = HttpUtils::execute_request(
            builder,
            self.provider_name(),
            method.as_str(),
            path,
        )
        .await?;

        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(&response.body, self.provider_name())?;

        if !cf_response.success || !response.is_success() {
            let raw = cf_response.errors.into_iter().next().map_or_else(
                || RawApiError::new(format!("HTTP {}", response.status)),
                |e| RawApiError::with_code(e.code.to_string(), e.message),
            );
            log::warn!("[cloudflare] {method} {path} rejected: {}", raw.message);
            return Err(self.map_error(raw, context));
        }

        Ok(cf_response.result)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None, context)
            .await?
            .ok_or_else(|| self.parse_error("response is missing 'result'"))
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body), context)
            .await?
            .ok_or_else(|| self.parse_error("response is missing 'result'"))
    }

    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        self.request::<serde_json::Value, ()>(Method::DELETE, path, None, context)
            .await
            .map(|_| ())
    }
}
