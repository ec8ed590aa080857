use anyhow::{Context, Result};
use camelk_model::clients::{k8s_client, KubeResourceClient};
use camelk_model::resources::ResourceManager;
use camelk_model::{CamelResource, ProviderConfig};
use log::debug;
use std::path::{Path, PathBuf};

/// The provider configuration resolved from `--config` and the global flags. No Kubernetes client
/// is created until a command asks for a manager, so offline commands work without a cluster.
#[derive(Debug)]
pub(crate) struct Provider {
    config: ProviderConfig,
}

impl Provider {
    pub(crate) fn from_args(
        config_path: Option<&Path>,
        kubeconfig: Option<PathBuf>,
        context: Option<String>,
        field_manager: Option<String>,
        force_conflicts: bool,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => ProviderConfig::from_path(path).context(format!(
                "Unable to load provider configuration from '{}'",
                path.display()
            ))?,
            None => ProviderConfig::default(),
        };
        if kubeconfig.is_some() {
            config.kubeconfig = kubeconfig;
        }
        if context.is_some() {
            config.context = context;
        }
        if let Some(field_manager) = field_manager {
            config.field_manager = field_manager;
        }
        if force_conflicts {
            config.force_conflicts = true;
        }
        debug!("using provider configuration {:?}", config);
        Ok(Self { config })
    }

    /// A `ResourceManager` for the kind `K` that talks to the cluster.
    pub(crate) async fn manager<K>(&self) -> Result<ResourceManager<KubeResourceClient<K>>>
    where
        K: CamelResource,
    {
        let k8s_client = k8s_client(&self.config)
            .await
            .context("Unable to create Kubernetes client")?;
        Ok(ResourceManager::new(
            KubeResourceClient::new_from_k8s_client(k8s_client),
            self.config.clone(),
        ))
    }
}
