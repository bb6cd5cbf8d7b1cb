//! Data-Aggregation API
//!
//! Topology retrieval from the two versions of the aggregation API.
//!
//! - `v0` (legacy): `GET /devices/{device}/openconfig`, flat `bgp` and
//!   `routing-policy` keys.
//! - `v1` (current): `GET /v1/devices/{device}/openconfig`, BGP nested under
//!   the first network instance's first protocol.

pub mod client;
pub mod topology;

pub use client::{DaapiClient, TopologySource};
pub use topology::{DaapiVersion, TopologyDocument};

/// Errors raised while retrieving a topology document
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("data-aggregation-api returned HTTP {0}")]
    Status(u16),

    #[error("data-aggregation-api unreachable")]
    Unreachable(String),

    #[error("data-aggregation-api returned an invalid openconfig document: {0}")]
    InvalidDocument(String),
}
