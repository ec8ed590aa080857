use super::error::Result;
use crate::{DeletionPropagation, ResourceIdentity};

/// Server-side apply options for a single patch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ApplyParams {
    /// The field manager that will own the applied fields.
    pub field_manager: String,
    /// Take ownership of fields that are currently owned by another manager.
    pub force: bool,
}

/// The capability the resource manager and the delete-wait poller need from a store of Camel-K
/// objects. `Object` is the kind of object the client works with, so one client instance talks
/// about exactly one kind.
///
/// # Example
///
/// ```
///# use camelk_model::camel::Integration;
///# use camelk_model::clients::{k8s_client, KubeResourceClient, ResourceClient};
///# use camelk_model::{ProviderConfig, ResourceIdentity};
///# async fn no_run() {
/// let k8s_client = k8s_client(&ProviderConfig::default()).await.unwrap();
/// let client = KubeResourceClient::<Integration>::new_from_k8s_client(k8s_client);
/// let id = ResourceIdentity::new("camel-k", "hello");
/// let integration = client.get(&id).await.unwrap();
///# }
/// ```
#[async_trait::async_trait]
pub trait ResourceClient: Send + Sync {
    type Object: Send + Sync;

    /// The kind of object this client works with, used in messages.
    fn kind(&self) -> &'static str;

    /// Fetch an object. `Ok(None)` means the object does not exist.
    async fn get(&self, id: &ResourceIdentity) -> Result<Option<Self::Object>>;

    /// Server-side apply `object` and return the object as stored by the server.
    async fn patch(
        &self,
        id: &ResourceIdentity,
        object: &Self::Object,
        params: &ApplyParams,
    ) -> Result<Self::Object>;

    /// Request deletion of an object. A missing object counts as deleted.
    async fn delete(
        &self,
        id: &ResourceIdentity,
        propagation: Option<DeletionPropagation>,
    ) -> Result<()>;
}
