//! `brick serve`

use crate::api::{create_router, AppState};
use crate::cli::{load_config, ServeArgs};
use crate::config::{BrickConfig, LogFormat, LoggingConfig};
use anyhow::Context;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File and environment configuration with the `serve` flags applied last.
pub fn load_config_with_overrides(args: &ServeArgs) -> anyhow::Result<BrickConfig> {
    let mut config = load_config(&args.config)?;
    config.server.port = args.port.unwrap_or(config.server.port);
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    config.health_check.enabled &= !args.no_health_check;
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG`, when set, replaces the
/// configured directives.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(crate::logging::build_filter_directives(config))?,
    };

    let fmt_layer = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    if config.enable_content_logging {
        tracing::warn!("Message previews are being logged; disable enable_content_logging in production");
    }
    Ok(())
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await
}

/// Cancel `cancel_token` on the first SIGINT or SIGTERM.
async fn wait_for_signal(cancel_token: CancellationToken) {
    let signal = tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "CTRL+C handler unavailable");
                return;
            }
        },
        _ = terminate_signal() => "SIGTERM",
        _ = cancel_token.cancelled() => return,
    };
    tracing::info!(signal, "Shutting down");
    cancel_token.cancel();
}

/// Serve `config` until `cancel_token` is cancelled.
pub async fn serve(config: BrickConfig, cancel_token: CancellationToken) -> anyhow::Result<()> {
    let addr = config.server.bind_address();
    let state = Arc::new(AppState::new(Arc::new(config)));

    let primary = state.orchestrator.primary_status();
    tracing::info!(
        primary_configured = primary.configured,
        fallback_configured = state.orchestrator.fallback_configured(),
        store = state.orchestrator.tracker().store_name(),
        "Routing configured"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(addr = %addr, "Brick API server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(cancel_token.cancelled_owned())
        .await?;

    tracing::info!("Brick server stopped");
    Ok(())
}

/// Entry point for `brick serve`.
pub async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    let cancel_token = CancellationToken::new();
    tokio::spawn(wait_for_signal(cancel_token.clone()));
    serve(config, cancel_token).await
}
