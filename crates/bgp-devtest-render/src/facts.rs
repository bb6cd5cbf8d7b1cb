//! Synthetic device facts.
//!
//! Facts are derived from the request parameters, never fetched.

use crate::error::CapabilityError;

/// Autonomous system number shared by every rendered device.
pub const DEFAULT_GLOBAL_ASN: u32 = 1234;

/// OS whose callers rarely pass a version.
pub const LEGACY_OS: &str = "eos";

/// Version assumed for [`LEGACY_OS`] when none is given.
pub const LEGACY_DEFAULT_VERSION: &str = "4.23";

/// Facts a device runtime would normally expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFacts {
    os: String,
    nos: String,
    version: String,
    global_asn: u32,
}

impl DeviceFacts {
    pub fn new(os: &str, version: &str, global_asn: u32) -> Self {
        let nos = normalize_os(os);
        let version = effective_version(&nos, version);
        Self {
            os: os.to_string(),
            nos,
            version,
            global_asn,
        }
    }

    /// OS as requested by the caller
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Normalized OS identifier used for fixture and template selection
    pub fn nos(&self) -> &str {
        &self.nos
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn global_asn(&self) -> u32 {
        self.global_asn
    }

    /// Look up a fact by key (`os`, `nos` or `version`)
    pub fn get(&self, key: &str) -> Result<&str, CapabilityError> {
        match key {
            "os" => Ok(&self.os),
            "nos" => Ok(&self.nos),
            "version" => Ok(&self.version),
            other => Err(CapabilityError::UnknownFact(other.to_string())),
        }
    }
}

/// Trim and lowercase an OS identifier.
pub fn normalize_os(os: &str) -> String {
    os.trim().to_ascii_lowercase()
}

/// Version to report for `os`, applying the legacy default when empty.
pub fn effective_version(os: &str, version: &str) -> String {
    if version.is_empty() && normalize_os(os) == LEGACY_OS {
        return LEGACY_DEFAULT_VERSION.to_string();
    }
    version.to_string()
}

/// Compare two dotted version strings numerically.
///
/// Non-numeric components compare as zero, missing components as zero.
pub fn version_at_least(version: &str, minimum: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| {
                part.chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
                    .parse()
                    .unwrap_or(0)
            })
            .collect()
    };

    let (lhs, rhs) = (parse(version), parse(minimum));
    let len = lhs.len().max(rhs.len());
    for i in 0..len {
        let a = lhs.get(i).copied().unwrap_or(0);
        let b = rhs.get(i).copied().unwrap_or(0);
        if a != b {
            return a > b;
        }
    }
    true
}
