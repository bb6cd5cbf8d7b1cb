//! Capability Traits
//!
//! The services a renderer may call, grouped by subsystem. A renderer entry
//! point receives exactly one of the subsystem traits, so a capability it
//! needs but the environment lacks is a compile error rather than a failed
//! lookup at render time.

use serde_json::Value;

use crate::error::CapabilityError;
use crate::facts::DeviceFacts;
use crate::template;
use crate::utils;

/// Capabilities shared by every rendering subsystem
pub trait Capabilities {
    /// Facts describing the target device
    fn facts(&self) -> &DeviceFacts;

    /// Fact lookup by key (`os`, `nos`, `version`)
    fn grain(&self, key: &str) -> Result<String, CapabilityError> {
        self.facts().get(key).map(str::to_string)
    }

    /// Contents of a named file
    fn file_str(&self, name: &str) -> Result<String, CapabilityError>;

    /// Fill `contents` (read from template `name`) with `params`
    fn apply_template(
        &self,
        name: &str,
        contents: &str,
        params: &Value,
    ) -> Result<String, CapabilityError> {
        Ok(template::apply_template_on_contents(name, contents, params)?)
    }

    fn format_route_policy_name(&self, name: &str) -> String {
        utils::format_route_policy_name(name)
    }

    fn deep_get<'a>(&self, value: &'a Value, path: &str) -> Option<&'a Value> {
        utils::deep_get(value, path)
    }
}

/// Capabilities available while rendering the BGP section
pub trait BgpCapabilities: Capabilities {
    /// Autonomous system number shared by every device
    fn global_as(&self) -> u32;

    /// Pillar value at a `:`-separated path, `null` when absent
    fn pillar(&self, key: &str) -> Result<Value, CapabilityError>;

    /// Neighbor inventory known for the device
    fn neighbors(&self) -> Result<Value, CapabilityError>;
}

/// Capabilities available while rendering the routing-policy section
pub trait RoutingPolicyCapabilities: Capabilities {
    /// Configuration currently running on the device
    fn current_config(&self) -> Result<String, CapabilityError>;
}
