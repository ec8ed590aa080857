use crate::constants::{
    DEFAULT_DELETE_POLL_INTERVAL_SECS, DEFAULT_DELETE_TIMEOUT_SECS, DEFAULT_FIELD_MANAGER,
};
use crate::error::{self, Result};
use kube::api::PropagationPolicy;
use log::debug;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings shared by every operation of a `ResourceManager`. Individual resource states can
/// override the field manager and the force-conflicts behavior.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// The field manager used for server-side apply.
    pub field_manager: String,
    /// Whether server-side apply should take ownership of fields managed by someone else.
    pub force_conflicts: bool,
    /// Path to a kubeconfig file. When absent the default client configuration is inferred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,
    /// The kubeconfig context to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            force_conflicts: false,
            kubeconfig: None,
            context: None,
        }
    }
}

impl ProviderConfig {
    /// Read a `ProviderConfig` from a YAML file. Omitted fields take their default values.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("reading provider configuration from '{}'", path.display());
        let data = std::fs::read_to_string(path).context(error::ConfigReadSnafu { path })?;
        Self::from_yaml_str(&data, path)
    }

    fn from_yaml_str(data: &str, path: &Path) -> Result<Self> {
        // An empty document is `null` in YAML, which should yield the defaults.
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data).context(error::ConfigDeserializationSnafu { path })?)
    }
}

/// How long to wait for an object to disappear after a delete request has been accepted.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitSpec {
    /// Zero means check once and return without polling.
    pub timeout_seconds: u64,
    pub poll_interval_seconds: u64,
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_DELETE_TIMEOUT_SECS,
            poll_interval_seconds: DEFAULT_DELETE_POLL_INTERVAL_SECS,
        }
    }
}

impl WaitSpec {
    pub fn new(timeout_seconds: u64, poll_interval_seconds: u64) -> Self {
        Self {
            timeout_seconds,
            poll_interval_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

/// Whether deleting an object cascades to its dependents. This is forwarded verbatim to the
/// Kubernetes API server.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub enum DeletionPropagation {
    Orphan,
    Background,
    Foreground,
}

serde_plain::derive_fromstr_from_deserialize!(DeletionPropagation, |e| -> crate::Error {
    error::OpaqueError::SerdePlain { source: e }.into()
});
serde_plain::derive_display_from_serialize!(DeletionPropagation);

impl From<DeletionPropagation> for PropagationPolicy {
    fn from(propagation: DeletionPropagation) -> Self {
        match propagation {
            DeletionPropagation::Orphan => PropagationPolicy::Orphan,
            DeletionPropagation::Background => PropagationPolicy::Background,
            DeletionPropagation::Foreground => PropagationPolicy::Foreground,
        }
    }
}
