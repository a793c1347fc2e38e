//! acmep - authorizing proxy for ACME DNS-01 challenges

mod config;
mod handler;
mod logging;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use acme_dns_proxy_core::AuthorizingProxy;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::logging::{LogFormat, TracingRequestSink};

#[derive(Parser, Debug)]
#[command(name = "acmep")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config", env = "ACMEP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log filter, e.g. `info` or `acmep=debug,acme_dns_proxy_core=trace`
    #[arg(long = "log-level", env = "ACMEP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long = "log-format", env = "ACMEP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Validate configuration and exit
    #[arg(long = "check")]
    check: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format)?;

    let (config, proxy) = load(&cli.config)?;
    if cli.check {
        tracing::info!("configuration OK");
        return Ok(());
    }

    serve(&cli.config, config, proxy).await?;
    tracing::info!("shutdown");
    Ok(())
}

/// Read the config file and build a proxy from it.
fn load(path: &Path) -> Result<(Config, AuthorizingProxy)> {
    tracing::info!(config = %path.display(), "parse config");
    let config = Config::load(path)?;
    let proxy = config.build_proxy(Arc::new(TracingRequestSink))?;
    Ok((config, proxy))
}

fn start(listen_addr: &str, state: web::Data<AuthorizingProxy>) -> Result<Server> {
    tracing::info!(listen_addr, "starting server");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handler::configure)
    })
    .disable_signals()
    .bind(listen_addr)
    .with_context(|| format!("failed to bind {listen_addr}"))?
    .run();
    Ok(server)
}

/// Serve until SIGINT or SIGTERM. SIGHUP reloads the config file and restarts
/// the server with the new proxy; records presented before the reload can no
/// longer be cleaned up through it. A config that fails to load is logged and
/// the running server is kept.
async fn serve(path: &Path, mut config: Config, proxy: AuthorizingProxy) -> Result<()> {
    let mut signals = Signals::install()?;
    let mut state = web::Data::new(proxy);

    loop {
        let server = start(&config.server.listen_addr, state.clone())?;
        let handle = server.handle();
        tokio::pin!(server);

        let reloaded = loop {
            tokio::select! {
                res = &mut server => return res.context("server error"),
                event = signals.next() => match event {
                    Event::Shutdown => break None,
                    Event::Reload => {
                        tracing::info!("reloading");
                        match load(path) {
                            Ok(next) => break Some(next),
                            Err(e) => tracing::error!(
                                error = %format!("{e:#}"),
                                "reload failed, keeping current configuration"
                            ),
                        }
                    }
                },
            }
        };

        handle.stop(true).await;
        server.await.context("server error")?;

        let Some((next_config, next_proxy)) = reloaded else {
            return Ok(());
        };
        config = next_config;
        state = web::Data::new(next_proxy);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Shutdown,
    Reload,
}

#[cfg(unix)]
struct Signals {
    hangup: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn install() -> Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            hangup: signal(SignalKind::hangup()).context("failed to register SIGHUP handler")?,
            interrupt: signal(SignalKind::interrupt())
                .context("failed to register SIGINT handler")?,
            terminate: signal(SignalKind::terminate())
                .context("failed to register SIGTERM handler")?,
        })
    }

    async fn next(&mut self) -> Event {
        tokio::select! {
            _ = self.hangup.recv() => Event::Reload,
            _ = self.interrupt.recv() => {
                tracing::info!("received SIGINT");
                Event::Shutdown
            }
            _ = self.terminate.recv() => {
                tracing::info!("received SIGTERM");
                Event::Shutdown
            }
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    #[allow(clippy::unnecessary_wraps)]
    fn install() -> Result<Self> {
        Ok(Self)
    }

    async fn next(&mut self) -> Event {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
        Event::Shutdown
    }
}
