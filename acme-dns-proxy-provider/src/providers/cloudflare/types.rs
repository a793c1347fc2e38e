//! Cloudflare API types

use serde::{Deserialize, Serialize};

/// Envelope shared by every Cloudflare v4 response
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
}

/// Only the fields the challenge flow reads back.
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    pub name: String,
}

/// Request body for `POST /zones/{zone_id}/dns_records`
#[derive(Debug, Serialize)]
pub struct CreateTxtRecord<'a> {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
}
