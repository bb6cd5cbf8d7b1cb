pub mod api;
pub mod auth;
pub mod common;
pub mod config;
pub mod daapi;
pub mod harness;

use std::sync::Arc;

use anyhow::Context;
use bgp_devtest_render::TemplateRenderer;
use tokio::net::TcpListener;

use crate::auth::{Credentials, TerminalPrompter};
use crate::config::Config;
use crate::daapi::DaapiClient;
use crate::harness::Harness;

/// Start the HTTP service and serve until the process is stopped
pub async fn run(config: Config) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    // Prompting blocks on stdin
    let (user, password) = (config.user.clone(), config.password.clone());
    let credentials = tokio::task::spawn_blocking(move || {
        Credentials::resolve(user, password, &mut TerminalPrompter)
    })
    .await
    .context("Credential prompt panicked")?
    .context("Failed to read data-aggregation API credentials")?;

    let client = DaapiClient::new(
        &config.daapi_v0_url,
        &config.daapi_v1_url,
        config.timeout_secs,
        credentials,
    )
    .map_err(anyhow::Error::msg)?;

    let files = config.file_store();
    match files.override_dir() {
        Some(dir) => tracing::info!("Template overrides from {:?}", dir),
        None => tracing::info!("Using embedded templates only"),
    }

    let harness = Arc::new(Harness::new(
        client,
        TemplateRenderer::new(),
        Arc::new(files),
        config.global_asn,
    ));

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;

    tracing::info!(
        listen = %config.listen,
        v0 = %config.daapi_v0_url,
        v1 = %config.daapi_v1_url,
        "bgp-devtest listening"
    );

    axum::serve(listener, api::router(harness))
        .await
        .context("HTTP server failed")
}
