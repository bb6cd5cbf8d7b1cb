//! Topology Document Shapes
//!
//! Each API version has its own document shape and its own extraction
//! function; the caller picks the shape through [`DaapiVersion`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::FetchError;

/// Aggregation API version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaapiVersion {
    /// Legacy endpoint
    V0,
    /// Current endpoint
    #[default]
    V1,
}

impl DaapiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            DaapiVersion::V0 => "v0",
            DaapiVersion::V1 => "v1",
        }
    }

    /// Request path for a device's openconfig document
    pub fn openconfig_path(&self, device: &str) -> String {
        let device = urlencoding::encode(device);
        match self {
            DaapiVersion::V0 => format!("/devices/{}/openconfig", device),
            DaapiVersion::V1 => format!("/v1/devices/{}/openconfig", device),
        }
    }
}

impl fmt::Display for DaapiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DaapiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v0" => Ok(DaapiVersion::V0),
            "v1" => Ok(DaapiVersion::V1),
            other => Err(format!("unknown daapi version '{}', expected v0 or v1", other)),
        }
    }
}

/// The subtrees of an openconfig document the renderer consumes
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyDocument {
    pub bgp: Value,
    pub routing_policy: Value,
}

impl TopologyDocument {
    /// Extract the BGP and routing-policy subtrees from a raw API response
    pub fn from_openconfig(version: DaapiVersion, document: Value) -> Result<Self, FetchError> {
        match version {
            DaapiVersion::V0 => extract_v0(document),
            DaapiVersion::V1 => extract_v1(document),
        }
    }
}

#[derive(Deserialize)]
struct V0Document {
    bgp: Value,
    #[serde(rename = "routing-policy")]
    routing_policy: Value,
}

#[derive(Deserialize)]
struct V1Document {
    #[serde(rename = "network-instances")]
    network_instances: NetworkInstances,
    #[serde(rename = "routing-policy")]
    routing_policy: Value,
}

#[derive(Deserialize)]
struct NetworkInstances {
    #[serde(rename = "network-instance")]
    network_instance: Vec<NetworkInstance>,
}

#[derive(Deserialize)]
struct NetworkInstance {
    protocols: Protocols,
}

#[derive(Deserialize)]
struct Protocols {
    protocol: Vec<Protocol>,
}

#[derive(Deserialize)]
struct Protocol {
    bgp: Value,
}

fn extract_v0(document: Value) -> Result<TopologyDocument, FetchError> {
    let doc: V0Document = serde_json::from_value(document)
        .map_err(|e| FetchError::InvalidDocument(e.to_string()))?;

    Ok(TopologyDocument {
        bgp: doc.bgp,
        routing_policy: doc.routing_policy,
    })
}

fn extract_v1(document: Value) -> Result<TopologyDocument, FetchError> {
    let doc: V1Document = serde_json::from_value(document)
        .map_err(|e| FetchError::InvalidDocument(e.to_string()))?;

    let bgp = doc
        .network_instances
        .network_instance
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::InvalidDocument("no network-instance".to_string()))?
        .protocols
        .protocol
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::InvalidDocument("no protocol in the first network-instance".to_string()))?
        .bgp;

    Ok(TopologyDocument {
        bgp,
        routing_policy: doc.routing_policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_parse() {
        assert_eq!("v0".parse::<DaapiVersion>().unwrap(), DaapiVersion::V0);
        assert_eq!("v1".parse::<DaapiVersion>().unwrap(), DaapiVersion::V1);
        assert!("v2".parse::<DaapiVersion>().is_err());
        assert_eq!(DaapiVersion::default(), DaapiVersion::V1);
    }

    #[test]
    fn test_openconfig_paths() {
        assert_eq!(DaapiVersion::V0.openconfig_path("r1"), "/devices/r1/openconfig");
        assert_eq!(DaapiVersion::V1.openconfig_path("r1"), "/v1/devices/r1/openconfig");
        assert_eq!(
            DaapiVersion::V1.openconfig_path("edge/1"),
            "/v1/devices/edge%2F1/openconfig"
        );
    }

    #[test]
    fn test_extract_v0() {
        let doc = json!({
            "bgp": {"global": {"config": {"as": 65000}}},
            "routing-policy": {"policy-definitions": {}},
            "interfaces": {}
        });
        let topology = TopologyDocument::from_openconfig(DaapiVersion::V0, doc).unwrap();
        assert_eq!(topology.bgp, json!({"global": {"config": {"as": 65000}}}));
        assert_eq!(topology.routing_policy, json!({"policy-definitions": {}}));
    }

    #[test]
    fn test_extract_v1() {
        let doc = json!({
            "network-instances": {"network-instance": [{
                "name": "default",
                "protocols": {"protocol": [{
                    "identifier": "BGP",
                    "name": "BGP",
                    "bgp": {"global": {"config": {"as": 65000}}}
                }]}
            }]},
            "routing-policy": {"policy-definitions": {}}
        });
        let topology = TopologyDocument::from_openconfig(DaapiVersion::V1, doc).unwrap();
        assert_eq!(topology.bgp, json!({"global": {"config": {"as": 65000}}}));
        assert_eq!(topology.routing_policy, json!({"policy-definitions": {}}));
    }

    #[test]
    fn test_shape_is_not_auto_detected() {
        let v0_doc = json!({"bgp": {}, "routing-policy": {}});
        assert!(matches!(
            TopologyDocument::from_openconfig(DaapiVersion::V1, v0_doc),
            Err(FetchError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_v1_without_instances_is_invalid() {
        let doc = json!({
            "network-instances": {"network-instance": []},
            "routing-policy": {}
        });
        let err = TopologyDocument::from_openconfig(DaapiVersion::V1, doc).unwrap_err();
        assert!(err.to_string().contains("no network-instance"));
    }
}
