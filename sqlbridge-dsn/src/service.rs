//! Named-service descriptor file for cluster addresses.
//!
//! Backends that cannot take an inline multi-host address accept a named
//! service instead, resolved through a plaintext file of the form
//! `NAME=(host1:port1,host2:port2,...)`. The file is rewritten on every
//! multi-host resolution; across independent processes the last writer wins,
//! but each individual write is atomic (temp file plus rename), so a reader
//! never observes a torn descriptor.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::cluster::ClusterAddressList;
use crate::error::{DsnError, DsnResult};

/// Default service name used in the descriptor file and as the substitute
/// host in rendered DSNs.
pub const DEFAULT_SERVICE_NAME: &str = "DM";

/// Default fixed path of the descriptor file.
pub const DEFAULT_SERVICE_PATH: &str = "/tmp/dm_svc.conf";

/// A named-service descriptor target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFile {
    /// Service name, substituted for the host in the rendered DSN.
    pub name: String,
    /// Path of the descriptor file.
    pub path: PathBuf,
}

impl Default for ServiceFile {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            path: PathBuf::from(DEFAULT_SERVICE_PATH),
        }
    }
}

impl ServiceFile {
    /// Create a descriptor target with a custom name and path.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The descriptor body for an expanded address list.
    pub fn contents(&self, addresses: &ClusterAddressList) -> String {
        format!("{}=({})", self.name, addresses.service_body())
    }

    /// Write the descriptor file, replacing any previous content.
    ///
    /// The temp file is created next to the target so the rename stays on one
    /// filesystem. A failure aborts the surrounding open with
    /// [`DsnError::ServiceConfigWrite`].
    pub fn write(&self, addresses: &ClusterAddressList) -> DsnResult<()> {
        let body = self.contents(addresses);
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(DsnError::ServiceConfigWrite)?;
        tmp.write_all(body.as_bytes())
            .map_err(DsnError::ServiceConfigWrite)?;
        tmp.persist(&self.path)
            .map_err(|e| DsnError::ServiceConfigWrite(e.error))?;
        debug!(path = %self.path.display(), service = %self.name, "cluster service descriptor written");
        Ok(())
    }
}
