//! Cloudflare DNS vendor

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone, CreateTxtRecord};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare DNS vendor, authenticated with a scoped API token.
pub struct CloudflareVendor {
    pub(crate) client: Client,
    pub(crate) api_token: String,
}

impl CloudflareVendor {
    pub fn new(api_token: String) -> Result<Self> {
        Ok(Self {
            client: create_http_client("cloudflare")?,
            api_token,
        })
    }
}
