//! Differential Render Harness
//!
//! Runs fetch → render for one or both aggregation API versions and
//! compares the outputs. The capability set is built per call and passed
//! to the renderer explicitly, so requests for different OS/version pairs
//! can run concurrently.

pub mod diff;

use std::sync::Arc;

use bgp_devtest_render::fixtures;
use bgp_devtest_render::{FileStore, MockEnvironment, RenderFlags, Renderer};
use tracing::info;

use crate::common::{AppError, AppResult};
use crate::daapi::{DaapiVersion, TopologyDocument, TopologySource};

pub use diff::unified_diff;

pub const ROUTE_POLICY_HEADER: &str = "! #### Route Policies ####";
pub const BGP_HEADER: &str = "! #### BGP ####";

/// Body returned when both API versions render identically
pub const NO_DIFF: &str = "OK: no diff found";

/// Template environment every render uses
const RENDER_ENV: &str = "base";

/// Result of a differential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Identical,
    /// Unified diff from the v0 rendering to the v1 rendering
    Changed(String),
}

impl DiffOutcome {
    pub fn into_body(self) -> String {
        match self {
            DiffOutcome::Identical => NO_DIFF.to_string(),
            DiffOutcome::Changed(diff) => diff,
        }
    }
}

/// Fetch/render/diff driver
pub struct Harness<S, R> {
    source: S,
    renderer: R,
    files: Arc<FileStore>,
    global_asn: u32,
}

impl<S, R> Harness<S, R>
where
    S: TopologySource,
    R: Renderer + Send + Sync,
{
    pub fn new(source: S, renderer: R, files: Arc<FileStore>, global_asn: u32) -> Self {
        Self {
            source,
            renderer,
            files,
            global_asn,
        }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Capability set for one request
    fn environment(&self, nos: &str, version: &str) -> AppResult<MockEnvironment> {
        Ok(MockEnvironment::new(
            nos,
            version,
            self.global_asn,
            Arc::clone(&self.files),
        )?)
    }

    /// Render BGP from the bundled self-test document, ignoring live topology
    pub fn render_selftest(&self, nos: &str, version: &str) -> AppResult<String> {
        let env = self.environment(nos, version)?;
        let document = fixtures::selftest_openconfig()
            .map_err(|e| AppError::internal(format!("Invalid self-test fixture: {}", e)))?;

        info!(nos = %nos, "Rendering self-test BGP configuration");

        let bgp = self.renderer.generate_bgp_config(
            &env,
            &document["bgp"],
            RenderFlags::default(),
            None,
            RENDER_ENV,
        )?;
        Ok(bgp + "\n")
    }

    /// Render only the BGP section for a live device
    pub async fn render_bgp(
        &self,
        device: &str,
        nos: &str,
        version: &str,
        daapi: DaapiVersion,
    ) -> AppResult<String> {
        let env = self.environment(nos, version)?;
        let topology = self.source.fetch(device, daapi).await?;

        info!(device = %device, nos = %nos, daapi = %daapi, "Rendering BGP configuration");

        let bgp = self.renderer.generate_bgp_config(
            &env,
            &topology.bgp,
            RenderFlags::default(),
            None,
            RENDER_ENV,
        )?;
        Ok(bgp + "\n")
    }

    /// Render routing policies then BGP for a live device
    pub async fn render_combined(
        &self,
        device: &str,
        nos: &str,
        version: &str,
        daapi: DaapiVersion,
    ) -> AppResult<String> {
        let env = self.environment(nos, version)?;
        let topology = self.source.fetch(device, daapi).await?;

        info!(device = %device, nos = %nos, daapi = %daapi, "Rendering combined configuration");

        self.render_topology(&env, &topology)
    }

    /// Render the device through both API versions and compare
    ///
    /// The v0 rendering is always the "from" side of the diff.
    pub async fn diff(&self, device: &str, nos: &str, version: &str) -> AppResult<DiffOutcome> {
        let env = self.environment(nos, version)?;

        let legacy = self.source.fetch(device, DaapiVersion::V0).await?;
        let legacy = self.render_topology(&env, &legacy)?;

        let current = self.source.fetch(device, DaapiVersion::V1).await?;
        let current = self.render_topology(&env, &current)?;

        if legacy == current {
            info!(device = %device, nos = %nos, "No diff between v0 and v1");
            return Ok(DiffOutcome::Identical);
        }

        let diff = unified_diff(&legacy, &current);
        info!(
            device = %device,
            nos = %nos,
            diff_lines = diff.lines().count(),
            "v0 and v1 renderings differ"
        );
        Ok(DiffOutcome::Changed(diff))
    }

    fn render_topology(&self, env: &MockEnvironment, topology: &TopologyDocument) -> AppResult<String> {
        let route_policies = self.renderer.generate_routing_policy_config(
            env,
            &topology.routing_policy,
            &topology.bgp,
            None,
            RENDER_ENV,
        )?;
        let bgp = self.renderer.generate_bgp_config(
            env,
            &topology.bgp,
            RenderFlags::default(),
            None,
            RENDER_ENV,
        )?;

        Ok(format!(
            "{}\n\n{}\n\n{}\n\n{}\n",
            ROUTE_POLICY_HEADER, route_policies, BGP_HEADER, bgp
        ))
    }
}
