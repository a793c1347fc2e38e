//! `DNSPod` `DnsVendor` implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, relative_or_apex};
use crate::traits::{DnsVendor, ErrorContext, ProviderErrorMapper};
use crate::types::TxtRecord;

use super::{
    CreateRecordRequest, CreateRecordResponse, DeleteRecordRequest, DeleteRecordResponse,
    DnspodVendor,
};

#[async_trait]
impl DnsVendor for DnspodVendor {
    fn id(&self) -> &'static str {
        "dnspod"
    }

    async fn append_record(&self, zone: &str, record: &TxtRecord) -> Result<String> {
        let domain = normalize_domain_name(zone);
        let sub_domain = relative_or_apex(&record.name);

        let req = CreateRecordRequest::txt(domain, sub_domain, record);
        let ctx = ErrorContext {
            record_name: Some(sub_domain.to_string()),
            domain: Some(domain.to_string()),
            ..Default::default()
        };

        let response: CreateRecordResponse = self.request("CreateRecord", &req, ctx).await?;
        log::debug!(
            "[dnspod] created TXT {sub_domain}.{domain} ({})",
            response.record_id
        );
        Ok(response.record_id.to_string())
    }

    async fn delete_record(&self, zone: &str, record_id: &str) -> Result<()> {
        let domain = normalize_domain_name(zone);
        let id: u64 = record_id
            .parse()
            .map_err(|_| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "record_id".to_string(),
                detail: format!("'{record_id}' is not a numeric DNSPod record ID"),
            })?;

        let req = DeleteRecordRequest {
            domain,
            record_id: id,
        };
        let ctx = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(domain.to_string()),
            ..Default::default()
        };

        let _: DeleteRecordResponse = self.request("DeleteRecord", &req, ctx).await?;
        Ok(())
    }
}
