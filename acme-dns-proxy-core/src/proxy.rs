//! Request orchestration: validate, authorize, dispatch.

use std::sync::Arc;

use crate::acl::AccessControlList;
use crate::error::{CoreError, CoreResult};
use crate::gateway::ProviderGateway;
use crate::types::{Action, Remote, Request};

/// What the sink gets to see about a request. Never includes the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Correlation id, unique per request.
    pub request_id: String,
    pub action: Action,
    pub remote: Remote,
    pub fqdn: String,
}

/// Receives one `received` and one `completed` call per request.
pub trait RequestSink: Send + Sync {
    fn received(&self, info: &RequestInfo);
    fn completed(&self, info: &RequestInfo, outcome: Result<(), &CoreError>);
}

/// Writes request events through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRequestSink;

impl RequestSink for LogRequestSink {
    fn received(&self, info: &RequestInfo) {
        log::info!(
            "[{}] {} {} from {} ({})",
            info.request_id,
            info.action,
            info.fqdn,
            info.remote.address,
            info.remote.client_name
        );
    }

    fn completed(&self, info: &RequestInfo, outcome: Result<(), &CoreError>) {
        let level = outcome_level(outcome);
        match outcome {
            Ok(()) => log::log!(level, "[{}] {} ok", info.request_id, info.action),
            Err(e) => log::log!(level, "[{}] {} {}: {e}", info.request_id, info.action, e.kind()),
        }
    }
}

/// Caller mistakes are warnings; anything the operator has to look at is an error.
fn outcome_level(outcome: Result<(), &CoreError>) -> log::Level {
    match outcome {
        Ok(()) => log::Level::Info,
        Err(e) if e.is_expected() => log::Level::Warn,
        Err(_) => log::Level::Error,
    }
}

/// The single entry point for inbound present/cleanup calls.
pub struct AuthorizingProxy {
    acl: AccessControlList,
    gateway: ProviderGateway,
    sink: Arc<dyn RequestSink>,
}

impl AuthorizingProxy {
    #[must_use]
    pub fn new(acl: AccessControlList, gateway: ProviderGateway, sink: Arc<dyn RequestSink>) -> Self {
        Self { acl, gateway, sink }
    }

    pub fn acl(&self) -> &AccessControlList {
        &self.acl
    }

    pub fn gateway(&self) -> &ProviderGateway {
        &self.gateway
    }

    /// Process one request. Every error is terminal for the request.
    pub async fn handle(&self, request: Request) -> CoreResult<()> {
        let info = RequestInfo {
            request_id: uuid::Uuid::new_v4().to_string(),
            action: request.action,
            remote: request.remote.clone(),
            fqdn: request.challenge.fqdn.clone(),
        };
        self.sink.received(&info);

        let result = self.process(&request).await;
        self.sink.completed(&info, result.as_ref().map(|_| ()));
        result
    }

    async fn process(&self, request: &Request) -> CoreResult<()> {
        // Validated
        request.challenge.validate()?;

        // Authorized
        let rule = self.acl.search(&request.challenge.fqdn)?;
        if !rule.check_auth(&request.auth_token) {
            return Err(CoreError::AccessDenied);
        }
        log::debug!(
            "{} authorized by rule {}",
            request.challenge.fqdn,
            rule.pattern
        );

        // Dispatched
        match request.action {
            Action::Present => self.gateway.present(&request.challenge).await,
            Action::Cleanup => self.gateway.cleanup(&request.challenge).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use acme_dns_proxy_provider::ProviderError;

    use super::*;
    use crate::acl::RuleConfig;
    use crate::test_utils::proxy_with;
    use crate::types::Challenge;

    fn rules() -> Vec<RuleConfig> {
        vec![RuleConfig {
            pattern: "*.example.com".to_string(),
            token: "T1".to_string(),
        }]
    }

    fn request(action: Action, token: &str, fqdn: &str, key: &str) -> Request {
        Request {
            action,
            auth_token: token.to_string(),
            challenge: Challenge::new(fqdn, key),
            remote: Remote {
                address: "127.0.0.1:50000".to_string(),
                client_name: "lego".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn present_then_cleanup_round_trip() {
        let (proxy, vendor, _) = proxy_with(&rules(), ["example.com."]);

        proxy
            .handle(request(Action::Present, "T1", "foo.example.com.", "abc"))
            .await
            .unwrap();
        proxy
            .handle(request(Action::Cleanup, "T1", "foo.example.com.", "abc"))
            .await
            .unwrap();

        assert_eq!(vendor.append_calls(), 1);
        assert_eq!(vendor.deleted()[0].record_id, vendor.appended()[0].record_id);
    }

    #[tokio::test]
    async fn wrong_token_is_denied_without_vendor_calls() {
        let (proxy, vendor, _) = proxy_with(&rules(), ["example.com."]);
        let err = proxy
            .handle(request(Action::Present, "T2", "foo.example.com.", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AccessDenied));
        assert_eq!(vendor.total_calls(), 0);
    }

    #[tokio::test]
    async fn unmatched_domain_is_not_found_without_vendor_calls() {
        let (proxy, vendor, _) = proxy_with(&rules(), ["example.com.", "other.org."]);
        let err = proxy
            .handle(request(Action::Present, "T1", "other.org", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ref d) if d == "other.org"));
        assert_eq!(vendor.total_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_challenge_is_rejected_first() {
        let (proxy, vendor, _) = proxy_with(&rules(), ["example.com."]);

        let err = proxy
            .handle(request(Action::Present, "T1", "", "abc"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "validation error: fqdn not set");

        // Validation runs before the token check.
        let err = proxy
            .handle(request(Action::Cleanup, "wrong", "foo.example.com.", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "validation error: key auth value not set");
        assert_eq!(vendor.total_calls(), 0);
    }

    #[tokio::test]
    async fn cleanup_without_present_is_reported() {
        let (proxy, _, _) = proxy_with(&rules(), ["example.com."]);
        let err = proxy
            .handle(request(Action::Cleanup, "T1", "foo.example.com.", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NoPendingRecord(_)));
    }

    #[tokio::test]
    async fn sink_sees_every_request_once_each_way() {
        let (proxy, _, sink) = proxy_with(&rules(), ["example.com."]);
        proxy
            .handle(request(Action::Present, "T1", "foo.example.com", "abc"))
            .await
            .unwrap();
        let _ = proxy
            .handle(request(Action::Present, "nope", "foo.example.com", "def"))
            .await;

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].info.fqdn, "foo.example.com.");
        assert_eq!(events[0].info.remote.client_name, "lego");
        assert_eq!(events[0].outcome, "ok");
        assert_eq!(events[1].outcome, "access_denied");
        assert_ne!(events[0].info.request_id, events[1].info.request_id);
        assert_eq!(sink.received_count(), 2);
    }

    #[tokio::test]
    async fn vendor_failure_is_wrapped() {
        let (proxy, vendor, sink) = proxy_with(&rules(), ["example.com."]);
        vendor.fail_next_append(ProviderError::Timeout {
            provider: "mock".into(),
            detail: "30s".into(),
        });
        let err = proxy
            .handle(request(Action::Present, "T1", "foo.example.com.", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Provider(_)));
        assert_eq!(sink.events()[0].outcome, "provider_error");
    }

    #[test]
    fn log_sink_levels_follow_outcome() {
        assert_eq!(outcome_level(Ok(())), log::Level::Info);
        assert_eq!(outcome_level(Err(&CoreError::AccessDenied)), log::Level::Warn);
        assert_eq!(
            outcome_level(Err(&CoreError::NoPendingRecord("a.example.com.".into()))),
            log::Level::Warn
        );
        assert_eq!(
            outcome_level(Err(&CoreError::ZoneResolution {
                fqdn: "a.example.com.".into(),
                detail: "timeout".into(),
            })),
            log::Level::Error
        );
        assert_eq!(
            outcome_level(Err(&CoreError::Provider(ProviderError::NetworkError {
                provider: "mock".into(),
                detail: "connection reset".into(),
            }))),
            log::Level::Error
        );
    }
}
