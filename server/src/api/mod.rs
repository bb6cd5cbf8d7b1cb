//! HTTP Routes
//!
//! Thin axum layer over [`Harness`]. Rendered configuration and diffs are
//! returned as plain text; failures as JSON `{"detail": ...}`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use bgp_devtest_render::Renderer;
use serde::Deserialize;
use tracing::debug;

use crate::common::{AppError, AppResult};
use crate::daapi::{DaapiVersion, TopologySource};
use crate::harness::Harness;

/// Query shared by the render endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    /// Device OS version; empty means "not specified"
    #[serde(default)]
    pub version: String,
    /// Aggregation API version, `v0` or `v1`
    pub daapi: Option<String>,
}

impl RenderQuery {
    fn daapi(&self) -> AppResult<DaapiVersion> {
        match self.daapi.as_deref() {
            None | Some("") => Ok(DaapiVersion::default()),
            Some(raw) => raw.parse().map_err(AppError::invalid_params),
        }
    }
}

/// Build the application router
pub fn router<S, R>(harness: Arc<Harness<S, R>>) -> Router
where
    S: TopologySource + 'static,
    R: Renderer + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/test/:nos", get(selftest::<S, R>))
        .route("/device/:device/:nos", get(render_device::<S, R>))
        .route("/device/:device/:nos/diff", get(diff_device::<S, R>))
        .with_state(harness)
}

async fn health() -> &'static str {
    "OK"
}

async fn selftest<S, R>(
    State(harness): State<Arc<Harness<S, R>>>,
    Path(nos): Path<String>,
    Query(query): Query<RenderQuery>,
) -> AppResult<String>
where
    S: TopologySource,
    R: Renderer + Send + Sync,
{
    debug!(nos = %nos, version = %query.version, "GET /test");
    harness.render_selftest(&nos, &query.version)
}

async fn render_device<S, R>(
    State(harness): State<Arc<Harness<S, R>>>,
    Path((device, nos)): Path<(String, String)>,
    Query(query): Query<RenderQuery>,
) -> AppResult<String>
where
    S: TopologySource,
    R: Renderer + Send + Sync,
{
    let daapi = query.daapi()?;
    debug!(device = %device, nos = %nos, daapi = %daapi, "GET /device");
    harness
        .render_combined(&device, &nos, &query.version, daapi)
        .await
}

async fn diff_device<S, R>(
    State(harness): State<Arc<Harness<S, R>>>,
    Path((device, nos)): Path<(String, String)>,
    Query(query): Query<RenderQuery>,
) -> AppResult<String>
where
    S: TopologySource,
    R: Renderer + Send + Sync,
{
    debug!(device = %device, nos = %nos, "GET /device/diff");
    let outcome = harness.diff(&device, &nos, &query.version).await?;
    Ok(outcome.into_body())
}
