//! Tencent Cloud `DNSPod` vendor

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

pub(crate) use types::{
    CreateRecordRequest, CreateRecordResponse, DeleteRecordRequest, DeleteRecordResponse,
    TencentResponse,
};

pub(crate) const DNSPOD_API_HOST: &str = "dnspod.tencentcloudapi.com";
pub(crate) const DNSPOD_SERVICE: &str = "dnspod";
pub(crate) const DNSPOD_VERSION: &str = "2021-03-23";
/// Line name `DNSPod` uses for the default resolution line.
pub(crate) const DEFAULT_RECORD_LINE: &str = "默认";
/// Lowest TTL the free plan accepts.
pub(crate) const MIN_RECORD_TTL: u32 = 600;

/// Tencent Cloud `DNSPod` vendor, signing every call with TC3-HMAC-SHA256.
pub struct DnspodVendor {
    pub(crate) client: Client,
    pub(crate) secret_id: String,
    pub(crate) secret_key: String,
}

impl DnspodVendor {
    pub fn new(secret_id: String, secret_key: String) -> Result<Self> {
        Ok(Self {
            client: create_http_client("dnspod")?,
            secret_id,
            secret_key,
        })
    }
}
