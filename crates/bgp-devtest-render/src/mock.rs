//! Environment Mocker
//!
//! Builds the capability set a renderer would normally get from a managed
//! device runtime. One environment is built per request and handed to the
//! renderer by reference, so concurrent requests for different OS/version
//! pairs never see each other's facts.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::capabilities::{BgpCapabilities, Capabilities, RoutingPolicyCapabilities};
use crate::error::CapabilityError;
use crate::facts::DeviceFacts;
use crate::files::FileStore;
use crate::fixtures::{self, OsFixture};
use crate::utils;

/// Substitute runtime for one OS/version pair
#[derive(Debug, Clone)]
pub struct MockEnvironment {
    facts: DeviceFacts,
    fixture: OsFixture,
    files: Arc<FileStore>,
}

impl MockEnvironment {
    /// Build the environment for `os` and `version`
    ///
    /// Fails with [`CapabilityError::UnsupportedOs`] when no fixture is
    /// registered for the OS.
    pub fn new(
        os: &str,
        version: &str,
        global_asn: u32,
        files: Arc<FileStore>,
    ) -> Result<Self, CapabilityError> {
        let facts = DeviceFacts::new(os, version, global_asn);
        let fixture = fixtures::lookup(facts.nos())?;

        debug!(
            os = %facts.nos(),
            version = %facts.version(),
            "Built mock environment"
        );

        Ok(Self {
            facts,
            fixture,
            files,
        })
    }
}

impl Capabilities for MockEnvironment {
    fn facts(&self) -> &DeviceFacts {
        &self.facts
    }

    fn file_str(&self, name: &str) -> Result<String, CapabilityError> {
        self.files.get_file_str(name)
    }
}

impl BgpCapabilities for MockEnvironment {
    fn global_as(&self) -> u32 {
        self.facts.global_asn()
    }

    fn pillar(&self, key: &str) -> Result<Value, CapabilityError> {
        Ok(utils::deep_get_with(&self.fixture.pillar, key, ':')
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn neighbors(&self) -> Result<Value, CapabilityError> {
        Ok(self.fixture.neighbors.clone())
    }
}

impl RoutingPolicyCapabilities for MockEnvironment {
    // Always rendered from a clean base.
    fn current_config(&self) -> Result<String, CapabilityError> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::DEFAULT_GLOBAL_ASN;
    use crate::fixtures::REGISTERED_OS;
    use serde_json::json;

    fn env(os: &str, version: &str) -> Result<MockEnvironment, CapabilityError> {
        MockEnvironment::new(os, version, DEFAULT_GLOBAL_ASN, Arc::new(FileStore::embedded()))
    }

    #[test]
    fn test_facts_for_every_registered_os() {
        for os in REGISTERED_OS {
            for version in ["", "1.2"] {
                let env = env(os, version).unwrap();
                assert_eq!(env.grain("os").unwrap(), *os);
                assert_eq!(env.grain("nos").unwrap(), *os);
                let expected = if version.is_empty() && *os == "eos" {
                    "4.23"
                } else {
                    version
                };
                assert_eq!(env.grain("version").unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_unknown_grain_fails() {
        let env = env("eos", "").unwrap();
        assert!(matches!(
            env.grain("model"),
            Err(CapabilityError::UnknownFact(_))
        ));
    }

    #[test]
    fn test_unsupported_os() {
        let err = env("ios", "15.2").unwrap_err();
        assert!(matches!(err, CapabilityError::UnsupportedOs(ref os) if os == "ios"));
        assert_eq!(err.to_string(), "unsupported OS: ios");
    }

    #[test]
    fn test_global_as_and_current_config() {
        let env = MockEnvironment::new("sonic", "", 64999, Arc::new(FileStore::embedded())).unwrap();
        assert_eq!(env.global_as(), 64999);
        assert_eq!(env.current_config().unwrap(), "");
    }

    #[test]
    fn test_pillar_lookup() {
        let env = env("eos", "").unwrap();
        assert_eq!(env.pillar("bgp:passwords:SPINES").unwrap(), json!("eos-spine-key"));
        assert_eq!(env.pillar("bgp:passwords:LEAVES").unwrap(), Value::Null);
    }

    #[test]
    fn test_neighbors_are_os_specific() {
        let eos = env("eos", "").unwrap().neighbors().unwrap();
        let junos = env("junos", "").unwrap().neighbors().unwrap();
        assert_ne!(eos, junos);
        assert!(eos.as_array().is_some_and(|n| !n.is_empty()));
    }

    #[test]
    fn test_pass_through_utilities() {
        let env = env("junos", "21.4R1").unwrap();
        assert_eq!(env.format_route_policy_name("spine-in"), "SPINE-IN");
        let doc = json!({"a": {"b": [1, 2]}});
        assert_eq!(env.deep_get(&doc, "a.b.1"), Some(&json!(2)));
    }

    #[test]
    fn test_template_capability() {
        let env = env("eos", "").unwrap();
        let contents = env.file_str("base/eos/bgp_header.tmpl").unwrap();
        let out = env
            .apply_template(
                "base/eos/bgp_header.tmpl",
                &contents,
                &json!({"asn": 65000, "router_id": "192.0.2.255"}),
            )
            .unwrap();
        assert_eq!(out, "router bgp 65000\n   router-id 192.0.2.255\n");
    }
}
