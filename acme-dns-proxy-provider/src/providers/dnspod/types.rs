//! Tencent Cloud `DNSPod` API types

use serde::{Deserialize, Serialize};

use crate::types::TxtRecord;

use super::{DEFAULT_RECORD_LINE, MIN_RECORD_TTL};

// ============ Response envelope ============

#[derive(Debug, Deserialize)]
pub struct TencentResponse<T> {
    #[serde(rename = "Response")]
    pub response: TencentResponseBody<T>,
}

/// Either `Error` is set, or the action's payload fields are present.
#[derive(Debug, Deserialize)]
pub struct TencentResponseBody<T> {
    #[serde(rename = "Error")]
    pub error: Option<TencentError>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ Record actions ============

#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    #[serde(rename = "Domain")]
    pub domain: &'a str,
    #[serde(rename = "SubDomain")]
    pub sub_domain: &'a str,
    #[serde(rename = "RecordType")]
    pub record_type: &'static str,
    #[serde(rename = "RecordLine")]
    pub record_line: &'static str,
    #[serde(rename = "Value")]
    pub value: &'a str,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

impl<'a> CreateRecordRequest<'a> {
    /// TXT record on the default line. The TTL is raised to [`MIN_RECORD_TTL`]
    /// since lower values fail with `LimitExceeded.RecordTtlLimit` on the free plan.
    pub fn txt(domain: &'a str, sub_domain: &'a str, record: &'a TxtRecord) -> Self {
        Self {
            domain,
            sub_domain,
            record_type: "TXT",
            record_line: DEFAULT_RECORD_LINE,
            value: &record.value,
            ttl: record.ttl.max(MIN_RECORD_TTL),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteRecordRequest<'a> {
    #[serde(rename = "Domain")]
    pub domain: &'a str,
    #[serde(rename = "RecordId")]
    pub record_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRecordResponse {}
