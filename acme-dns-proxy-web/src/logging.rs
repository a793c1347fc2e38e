//! Tracing setup and the structured request sink

use acme_dns_proxy_core::{CoreError, RequestInfo, RequestSink};
use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber. `log` records from the library crates are
/// forwarded into it.
pub fn init(level: &str, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}"))?;
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    }
    .context("failed to install tracing subscriber")
}

/// Emits one event per request stage with `request_id`, `action`, `remote`,
/// `client`, `fqdn` and `outcome` fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRequestSink;

impl RequestSink for TracingRequestSink {
    fn received(&self, info: &RequestInfo) {
        tracing::info!(
            request_id = %info.request_id,
            action = %info.action,
            remote = %info.remote.address,
            client = %info.remote.client_name,
            fqdn = %info.fqdn,
            "request received"
        );
    }

    fn completed(&self, info: &RequestInfo, outcome: Result<(), &CoreError>) {
        match outcome {
            Ok(()) => tracing::info!(
                request_id = %info.request_id,
                action = %info.action,
                fqdn = %info.fqdn,
                outcome = "ok",
                "request completed"
            ),
            Err(e) if e.is_expected() => tracing::warn!(
                request_id = %info.request_id,
                action = %info.action,
                remote = %info.remote.address,
                fqdn = %info.fqdn,
                outcome = e.kind(),
                error = %e,
                "request rejected"
            ),
            Err(e) => tracing::error!(
                request_id = %info.request_id,
                action = %info.action,
                remote = %info.remote.address,
                fqdn = %info.fqdn,
                outcome = e.kind(),
                error = %e,
                "request failed"
            ),
        }
    }
}
