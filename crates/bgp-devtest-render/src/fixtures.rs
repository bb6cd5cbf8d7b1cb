//! Canned per-OS data standing in for pillar and neighbor inventory.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CapabilityError;

const EOS: &str = include_str!("../fixtures/eos.json");
const JUNOS: &str = include_str!("../fixtures/junos.json");
const SONIC: &str = include_str!("../fixtures/sonic.json");

const SELFTEST_OPENCONFIG: &str = include_str!("../fixtures/v4_only/openconfig.json");

/// OS identifiers with a registered fixture
pub const REGISTERED_OS: &[&str] = &["eos", "junos", "sonic"];

/// Pillar and neighbor data for one OS
#[derive(Debug, Clone, Deserialize)]
pub struct OsFixture {
    #[serde(default)]
    pub pillar: Value,
    #[serde(default)]
    pub neighbors: Value,
}

/// Load the fixture registered for a normalized OS identifier
pub fn lookup(nos: &str) -> Result<OsFixture, CapabilityError> {
    let raw = match nos {
        "eos" => EOS,
        "junos" => JUNOS,
        "sonic" => SONIC,
        other => return Err(CapabilityError::UnsupportedOs(other.to_string())),
    };

    serde_json::from_str(raw).map_err(|source| CapabilityError::Fixture {
        os: nos.to_string(),
        source,
    })
}

/// Static openconfig document used by the self-test route (IPv4 neighbors only)
pub fn selftest_openconfig() -> Result<Value, serde_json::Error> {
    serde_json::from_str(SELFTEST_OPENCONFIG)
}
