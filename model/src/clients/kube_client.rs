use super::error::{self, Result};
use super::resource_client::{ApplyParams, ResourceClient};
use super::AllowNotFound;
use crate::{CamelResource, DeletionPropagation, ProviderConfig, ResourceIdentity};
use kube::api::{DeleteParams, Patch, PatchParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use log::{debug, trace};
use snafu::ResultExt;
use std::marker::PhantomData;

/// Create a `kube::Client` from the kubeconfig path and context in `config`, falling back to the
/// inferred default (in-cluster variables or `KUBECONFIG`) when no path is given.
pub async fn k8s_client(config: &ProviderConfig) -> Result<Client> {
    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..KubeConfigOptions::default()
    };
    let kube_config = match &config.kubeconfig {
        Some(path) => {
            debug!("creating client from kubeconfig '{}'", path.display());
            let kubeconfig = Kubeconfig::read_from(path).context(error::KubeconfigSnafu)?;
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .context(error::KubeconfigSnafu)?
        }
        None if config.context.is_some() => Config::from_kubeconfig(&options)
            .await
            .context(error::KubeconfigSnafu)?,
        None => return Ok(Client::try_default().await.context(error::InitializationSnafu)?),
    };
    Ok(Client::try_from(kube_config).context(error::InitializationSnafu)?)
}

/// A `ResourceClient` for one Camel-K kind, backed by the Kubernetes API.
pub struct KubeResourceClient<K> {
    k8s_client: Client,
    _kind: PhantomData<K>,
}

// A derive would require `K: Clone`, which is not needed to clone the client.
impl<K> Clone for KubeResourceClient<K> {
    fn clone(&self) -> Self {
        Self::new_from_k8s_client(self.k8s_client.clone())
    }
}

impl<K> KubeResourceClient<K> {
    pub fn new_from_k8s_client(k8s_client: Client) -> Self {
        Self {
            k8s_client,
            _kind: PhantomData,
        }
    }
}

impl<K> KubeResourceClient<K>
where
    K: CamelResource,
{
    fn api(&self, namespace: &str) -> Api<K> {
        Api::<K>::namespaced(self.k8s_client.clone(), namespace)
    }
}

#[async_trait::async_trait]
impl<K> ResourceClient for KubeResourceClient<K>
where
    K: CamelResource,
{
    type Object = K;

    fn kind(&self) -> &'static str {
        K::KIND
    }

    async fn get(&self, id: &ResourceIdentity) -> Result<Option<K>> {
        trace!("getting {} '{}'", K::KIND, id);
        Ok(self
            .api(&id.namespace)
            .get(&id.name)
            .await
            .allow_not_found(|_| trace!("{} '{}' was not found", K::KIND, id))
            .context(error::KubeApiCallSnafu {
                method: "get",
                what: K::KIND,
                name: id.to_string(),
            })?)
    }

    async fn patch(&self, id: &ResourceIdentity, object: &K, params: &ApplyParams) -> Result<K> {
        debug!(
            "applying {} '{}' as field manager '{}' (force: {})",
            K::KIND,
            id,
            params.field_manager,
            params.force
        );
        let mut patch_params = PatchParams::apply(&params.field_manager);
        if params.force {
            patch_params = patch_params.force();
        }
        Ok(self
            .api(&id.namespace)
            .patch(&id.name, &patch_params, &Patch::Apply(object))
            .await
            .context(error::KubeApiCallSnafu {
                method: "apply",
                what: K::KIND,
                name: id.to_string(),
            })?)
    }

    async fn delete(
        &self,
        id: &ResourceIdentity,
        propagation: Option<DeletionPropagation>,
    ) -> Result<()> {
        debug!(
            "deleting {} '{}' with propagation policy {:?}",
            K::KIND,
            id,
            propagation
        );
        let delete_params = DeleteParams {
            propagation_policy: propagation.map(Into::into),
            ..DeleteParams::default()
        };
        self.api(&id.namespace)
            .delete(&id.name, &delete_params)
            .await
            .allow_not_found(|_| debug!("{} '{}' was already gone", K::KIND, id))
            .context(error::KubeApiCallSnafu {
                method: "delete",
                what: K::KIND,
                name: id.to_string(),
            })?;
        Ok(())
    }
}
