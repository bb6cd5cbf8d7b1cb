//! File Store
//!
//! Backs the file-content capability. Names are relative paths of the form
//! `{env}/{nos}/{file}`. An override directory, when configured, is
//! searched first; otherwise the templates compiled into the binary answer.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CapabilityError;

macro_rules! embedded {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $name)))),*]
    };
}

const EMBEDDED: &[(&str, &str)] = embedded![
    "base/eos/bgp_header.tmpl",
    "base/eos/bgp_neighbor.tmpl",
    "base/eos/bgp_footer.tmpl",
    "base/eos/prefix_list.tmpl",
    "base/eos/policy_statement.tmpl",
    "base/junos/bgp_header.tmpl",
    "base/junos/bgp_neighbor.tmpl",
    "base/junos/bgp_footer.tmpl",
    "base/junos/prefix_list.tmpl",
    "base/junos/policy_statement.tmpl",
    "base/sonic/bgp_header.tmpl",
    "base/sonic/bgp_neighbor.tmpl",
    "base/sonic/bgp_footer.tmpl",
    "base/sonic/prefix_list.tmpl",
    "base/sonic/policy_statement.tmpl",
];

/// Read-only template and file source
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    override_dir: Option<PathBuf>,
}

impl FileStore {
    /// Store serving only the embedded templates
    pub fn embedded() -> Self {
        Self { override_dir: None }
    }

    /// Store that looks in `dir` before the embedded templates
    pub fn with_override_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Return the contents of a named file
    pub fn get_file_str(&self, name: &str) -> Result<String, CapabilityError> {
        if name.split('/').any(|part| part == "..") || name.starts_with('/') {
            return Err(CapabilityError::FileNotFound(name.to_string()));
        }

        if let Some(dir) = &self.override_dir {
            let path = dir.join(name);
            if path.is_file() {
                debug!("Reading {} from {:?}", name, dir);
                return std::fs::read_to_string(&path).map_err(|source| {
                    CapabilityError::FileRead {
                        path: path.display().to_string(),
                        source,
                    }
                });
            }
        }

        EMBEDDED
            .iter()
            .find(|(embedded_name, _)| *embedded_name == name)
            .map(|(_, contents)| contents.to_string())
            .ok_or_else(|| CapabilityError::FileNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_template_found() {
        let store = FileStore::embedded();
        let header = store.get_file_str("base/eos/bgp_header.tmpl").unwrap();
        assert!(header.starts_with("router bgp {asn}"));
    }

    #[test]
    fn test_unknown_file_fails() {
        let store = FileStore::embedded();
        assert!(matches!(
            store.get_file_str("base/eos/missing.tmpl"),
            Err(CapabilityError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let store = FileStore::with_override_dir(std::env::temp_dir());
        assert!(store.get_file_str("../etc/passwd").is_err());
        assert!(store.get_file_str("/etc/passwd").is_err());
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = std::env::temp_dir().join(format!("bgp-devtest-files-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("base/eos")).unwrap();
        std::fs::write(dir.join("base/eos/bgp_footer.tmpl"), "! custom\n").unwrap();

        let store = FileStore::with_override_dir(&dir);
        assert_eq!(store.get_file_str("base/eos/bgp_footer.tmpl").unwrap(), "! custom\n");
        // Files absent from the override dir fall back to the embedded set
        assert!(store.get_file_str("base/eos/bgp_header.tmpl").is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
