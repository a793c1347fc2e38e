//! `DNSPod` error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DnspodVendor;

/// Reference: <https://cloud.tencent.com/document/api/1427/56192>
impl ProviderErrorMapper for DnspodVendor {
    fn provider_name(&self) -> &'static str {
        "dnspod"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ Authentication error ============
            Some(
                "AuthFailure"
                | "AuthFailure.InvalidAuthorization"
                | "AuthFailure.InvalidSecretId"
                | "AuthFailure.SecretIdNotFound"
                | "AuthFailure.SignatureExpire"
                | "AuthFailure.SignatureFailure"
                | "AuthFailure.TokenFailure"
                | "AuthFailure.UnauthorizedOperation"
                | "InvalidParameter.InvalidSecretId"
                | "InvalidParameter.InvalidSignature"
                | "InvalidParameter.PermissionDenied"
                | "InvalidParameter.LoginTokenNotExists",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Quota limit ============
            Some(
                "LimitExceeded"
                | "LimitExceeded.SubdomainLevelLimit"
                | "LimitExceeded.SubdomainRollLimit"
                | "RequestLimitExceeded.UinLimitExceeded",
            ) => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Frequency limit ============
            Some(
                "RequestLimitExceeded"
                | "RequestLimitExceeded.RequestLimitExceeded"
                | "FailedOperation.FrequencyLimit"
                | "InvalidParameter.OperationIsTooFrequent",
            ) => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ============ Record already exists ============
            Some("InvalidParameter.DomainRecordExist") => ProviderError::RecordExists {
                provider: self.provider_name().to_string(),
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // ============ Zone does not exist ============
            Some("ResourceNotFound.NoDataOfDomain" | "InvalidParameterValue.DomainNotExists") => {
                ProviderError::DomainNotFound {
                    provider: self.provider_name().to_string(),
                    domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            }

            // ============ Zone is locked/disabled ============
            Some(
                "FailedOperation.DomainIsLocked"
                | "FailedOperation.DomainIsSpam"
                | "FailedOperation.AccountIsLocked"
                | "InvalidParameter.UserAlreadyLocked",
            ) => ProviderError::DomainLocked {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // ============ Permission/Operation Denied ============
            Some(
                "OperationDenied"
                | "OperationDenied.AccessDenied"
                | "OperationDenied.DomainOwnerAllowedOnly"
                | "OperationDenied.NoPermissionToOperateDomain"
                | "OperationDenied.NotResourceOwner"
                | "UnauthorizedOperation"
                | "FailedOperation.NotDomainOwner",
            ) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Invalid parameter - line ============
            Some("InvalidParameter.RecordLineInvalid" | "InvalidParameter.LineNotExist") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "line".to_string(),
                    detail: raw.message,
                }
            }

            // ============ Invalid parameter - record value ============
            Some(
                "InvalidParameter.RecordValueInvalid" | "InvalidParameter.RecordValueLengthInvalid",
            ) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "value".to_string(),
                detail: raw.message,
            },

            // ============ Invalid parameter - subdomain ============
            Some("InvalidParameter.SubdomainInvalid") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "subdomain".to_string(),
                detail: raw.message,
            },

            // ============ Invalid parameter - TTL ============
            Some("LimitExceeded.RecordTtlLimit") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ttl".to_string(),
                detail: raw.message,
            },

            // ============ Invalid parameter - zone name ============
            Some(
                "InvalidParameter.DomainIdInvalid"
                | "InvalidParameter.DomainInvalid"
                | "InvalidParameter.DomainTooLong"
                | "InvalidParameter.DomainTypeInvalid",
            ) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "domain".to_string(),
                detail: raw.message,
            },

            // ============ Record does not exist ============
            Some("ResourceNotFound.NoDataOfRecord" | "InvalidParameter.RecordIdInvalid") => {
                ProviderError::RecordNotFound {
                    provider: self.provider_name().to_string(),
                    record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            }

            // ============ Other errors fallback ============
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> DnspodVendor {
        DnspodVendor::new(String::new(), String::new()).unwrap()
    }

    fn ctx() -> ErrorContext {
        ErrorContext {
            record_name: Some("_acme-challenge.www".to_string()),
            record_id: Some("1234".to_string()),
            domain: Some("example.com".to_string()),
        }
    }

    fn map(code: &str) -> ProviderError {
        vendor().map_error(RawApiError::with_code(code, "message"), ctx())
    }

    #[test]
    fn signature_failures_are_credential_errors() {
        for code in [
            "AuthFailure.SignatureFailure",
            "AuthFailure.SecretIdNotFound",
            "InvalidParameter.LoginTokenNotExists",
        ] {
            assert!(
                matches!(map(code), ProviderError::InvalidCredentials { .. }),
                "code {code}"
            );
        }
    }

    #[test]
    fn frequency_limit_is_rate_limited() {
        assert!(matches!(
            map("RequestLimitExceeded"),
            ProviderError::RateLimited {
                retry_after: None,
                ..
            }
        ));
    }

    #[test]
    fn subdomain_limit_is_quota() {
        assert!(matches!(
            map("LimitExceeded.SubdomainRollLimit"),
            ProviderError::QuotaExceeded { .. }
        ));
    }

    #[test]
    fn duplicate_record_names_the_record() {
        assert!(matches!(
            map("InvalidParameter.DomainRecordExist"),
            ProviderError::RecordExists { record_name, .. } if record_name == "_acme-challenge.www"
        ));
    }

    #[test]
    fn missing_zone_names_the_zone() {
        assert!(matches!(
            map("ResourceNotFound.NoDataOfDomain"),
            ProviderError::DomainNotFound { domain, .. } if domain == "example.com"
        ));
    }

    #[test]
    fn locked_zone() {
        assert!(matches!(
            map("FailedOperation.DomainIsLocked"),
            ProviderError::DomainLocked { .. }
        ));
    }

    #[test]
    fn missing_record_names_the_id() {
        assert!(matches!(
            map("ResourceNotFound.NoDataOfRecord"),
            ProviderError::RecordNotFound { record_id, .. } if record_id == "1234"
        ));
    }

    #[test]
    fn ttl_below_plan_minimum() {
        assert!(matches!(
            map("LimitExceeded.RecordTtlLimit"),
            ProviderError::InvalidParameter { param, .. } if param == "ttl"
        ));
    }

    #[test]
    fn unmapped_code_is_unknown() {
        assert!(matches!(
            map("InternalError"),
            ProviderError::Unknown { raw_code: Some(code), .. } if code == "InternalError"
        ));
        assert!(matches!(
            vendor().map_error(RawApiError::new("boom"), ErrorContext::default()),
            ProviderError::Unknown { raw_code: None, .. }
        ));
    }
}
