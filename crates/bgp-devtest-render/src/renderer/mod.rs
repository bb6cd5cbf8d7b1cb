//! Renderer Interface
//!
//! Rendering logic is consumed through [`Renderer`]; the harness never
//! depends on a particular implementation. [`TemplateRenderer`] is the
//! reference implementation driven by the per-OS templates of the file
//! capability.

mod bgp;
mod routing_policy;

use serde_json::Value;

use crate::capabilities::{BgpCapabilities, Capabilities, RoutingPolicyCapabilities};
use crate::error::RenderError;

/// Switches passed to the BGP entry point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    /// Mark the output as a dry run
    pub test: bool,
}

/// Configuration generator for one device
pub trait Renderer {
    /// Render the BGP section from the openconfig `bgp` subtree
    fn generate_bgp_config(
        &self,
        caps: &dyn BgpCapabilities,
        bgp: &Value,
        flags: RenderFlags,
        current: Option<&str>,
        env: &str,
    ) -> Result<String, RenderError>;

    /// Render the routing-policy section from the openconfig
    /// `routing-policy` subtree; `bgp` tells which policies are in use
    fn generate_routing_policy_config(
        &self,
        caps: &dyn RoutingPolicyCapabilities,
        routing_policy: &Value,
        bgp: &Value,
        current: Option<&str>,
        env: &str,
    ) -> Result<String, RenderError>;
}

/// Template-driven reference renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TemplateRenderer {
    fn generate_bgp_config(
        &self,
        caps: &dyn BgpCapabilities,
        bgp: &Value,
        flags: RenderFlags,
        current: Option<&str>,
        env: &str,
    ) -> Result<String, RenderError> {
        bgp::generate(caps, bgp, flags, current, env)
    }

    fn generate_routing_policy_config(
        &self,
        caps: &dyn RoutingPolicyCapabilities,
        routing_policy: &Value,
        bgp: &Value,
        current: Option<&str>,
        env: &str,
    ) -> Result<String, RenderError> {
        routing_policy::generate(caps, routing_policy, bgp, current, env)
    }
}

/// Read `{env}/{nos}/{file}` and fill it with `params`
fn render_template<C>(caps: &C, env: &str, file: &str, params: &Value) -> Result<String, RenderError>
where
    C: Capabilities + ?Sized,
{
    let nos = caps.grain("nos")?;
    let name = format!("{}/{}/{}", env, nos, file);
    let contents = caps.file_str(&name)?;
    Ok(caps.apply_template(&name, &contents, params)?)
}

/// Array found at `path`, empty when absent
fn list_at<'a, C>(caps: &C, value: &'a Value, path: &str) -> &'a [Value]
where
    C: Capabilities + ?Sized,
{
    caps.deep_get(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Policy names listed under `apply-policy.config.<direction>` of a neighbor
fn applied_policies<'a, C>(caps: &C, neighbor: &'a Value, direction: &str) -> Vec<&'a str>
where
    C: Capabilities + ?Sized,
{
    list_at(caps, neighbor, &format!("apply-policy.config.{}", direction))
        .iter()
        .filter_map(Value::as_str)
        .collect()
}

fn comment_prefix(nos: &str) -> &'static str {
    match nos {
        "junos" => "#",
        _ => "!",
    }
}

/// Reject any non-empty prior configuration
fn ensure_clean_base(current: &str) -> Result<(), RenderError> {
    if current.trim().is_empty() {
        Ok(())
    } else {
        Err(RenderError::IncrementalUnsupported)
    }
}
