//! Configuration management
//!
//! Command-line flags with environment fallbacks. Everything has a default
//! except the aggregation API credentials, which are prompted for when
//! absent.

use std::net::SocketAddr;
use std::path::PathBuf;

use bgp_devtest_render::{FileStore, DEFAULT_GLOBAL_ASN};
use clap::Parser;

#[derive(Parser, Clone)]
#[command(
    name = "bgp-devtest",
    version,
    about = "Render BGP and routing-policy configuration from both data-aggregation API versions and diff the results"
)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "BGP_DEVTEST_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Base URL of the legacy (v0) data-aggregation API
    #[arg(long, env = "DAAPI_V0_URL", default_value = "http://127.0.0.1:8000")]
    pub daapi_v0_url: String,

    /// Base URL of the current (v1) data-aggregation API
    #[arg(long, env = "DAAPI_V1_URL", default_value = "http://127.0.0.1:8001")]
    pub daapi_v1_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "DAAPI_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Autonomous system number reported by the global-AS capability
    #[arg(long, env = "GLOBAL_ASN", default_value_t = DEFAULT_GLOBAL_ASN)]
    pub global_asn: u32,

    /// Directory searched for templates before the embedded set
    #[arg(long, env = "TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Data-aggregation API user (prompted when absent)
    #[arg(long, env = "DAAPI_USER")]
    pub user: Option<String>,

    /// Data-aggregation API password (prompted when absent)
    #[arg(long, env = "DAAPI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// Keep the password out of startup logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listen", &self.listen)
            .field("daapi_v0_url", &self.daapi_v0_url)
            .field("daapi_v1_url", &self.daapi_v1_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("global_asn", &self.global_asn)
            .field("template_dir", &self.template_dir)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Check values clap cannot validate on its own
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [("v0", &self.daapi_v0_url), ("v1", &self.daapi_v1_url)] {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| format!("Invalid {} data-aggregation API URL '{}': {}", name, url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!(
                    "Invalid {} data-aggregation API URL '{}': expected http or https",
                    name, url
                ));
            }
        }

        if self.timeout_secs == 0 {
            return Err("Upstream timeout must be at least one second".to_string());
        }

        if let Some(dir) = &self.template_dir {
            if !dir.is_dir() {
                return Err(format!("Template directory not found at {:?}", dir));
            }
        }

        Ok(())
    }

    /// File store honoring the template override directory
    pub fn file_store(&self) -> FileStore {
        match &self.template_dir {
            Some(dir) => FileStore::with_override_dir(dir),
            None => FileStore::embedded(),
        }
    }
}
