use super::error::{self, Result};
use super::ResourceState;
use crate::clients::{ApplyParams, ResourceClient};
use crate::wait::{wait_for_deletion, WaitOutcome};
use crate::{CamelResource, ProviderConfig, ResourceIdentity};
use log::{debug, info};
use snafu::{ensure, OptionExt, ResultExt};

/// # Resource Manager
///
/// The resource manager provides the lifecycle of one kind of Camel-K object, expressed in terms
/// of a `ResourceState`:
///
/// - `create` and `update` send the state with server-side apply and return what the server stored
/// - `read` refreshes a state, or reports that the object is gone
/// - `delete` deletes the object and waits for it to disappear
/// - `import` and `lookup` fetch an existing object that is not yet in any state
///
/// All behavior is delegated to a `ResourceClient`. The `ProviderConfig` supplies the field manager
/// and the force-conflicts setting unless a state overrides them.
pub struct ResourceManager<C> {
    client: C,
    config: ProviderConfig,
}

impl<C, K> ResourceManager<C>
where
    C: ResourceClient<Object = K>,
    K: CamelResource,
{
    pub fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The server-side apply options for `state`, preferring its own settings over the provider's.
    pub fn apply_params(&self, state: &ResourceState<K::Spec>) -> ApplyParams {
        ApplyParams {
            field_manager: state
                .field_manager
                .clone()
                .unwrap_or_else(|| self.config.field_manager.clone()),
            force: state.force_conflicts.unwrap_or(self.config.force_conflicts),
        }
    }

    /// Create the object described by `plan`.
    pub async fn create(&self, plan: ResourceState<K::Spec>) -> Result<ResourceState<K::Spec>> {
        let id = validated_identity(&plan)?;
        info!("creating {} '{}'", K::KIND, id);
        self.apply(&id, plan, "create").await
    }

    /// Refresh `state` from the server. Returns `None` when the object no longer exists, in which
    /// case the caller should forget it.
    pub async fn read(
        &self,
        state: &ResourceState<K::Spec>,
    ) -> Result<Option<ResourceState<K::Spec>>> {
        let id = state.identity();
        let object = self
            .client
            .get(&id)
            .await
            .context(error::ClientSnafu {
                action: format!("read {} '{}'", K::KIND, id),
            })?;
        match object {
            None => {
                info!("{} '{}' no longer exists", K::KIND, id);
                Ok(None)
            }
            Some(object) => Ok(Some(ResourceState::from_object(object).with_settings_of(state))),
        }
    }

    /// Bring the object in line with `plan`. The name and namespace cannot change.
    pub async fn update(
        &self,
        prior: &ResourceState<K::Spec>,
        plan: ResourceState<K::Spec>,
    ) -> Result<ResourceState<K::Spec>> {
        let from = prior.identity();
        let to = validated_identity(&plan)?;
        ensure!(
            from == to,
            error::RequiresReplacementSnafu {
                kind: K::KIND,
                from,
                to
            }
        );
        info!("updating {} '{}'", K::KIND, to);
        self.apply(&to, plan, "update").await
    }

    /// Create or update according to `plan.id`. Without an id the object is created. With an id,
    /// the object it names is updated from `plan`, or created again if it no longer exists.
    pub async fn apply_state(
        &self,
        plan: ResourceState<K::Spec>,
    ) -> Result<ResourceState<K::Spec>> {
        let id = match plan.id.as_deref() {
            None => return self.create(plan).await,
            Some(id) => id.to_string(),
        };
        match self.import(&id).await {
            Ok(prior) => {
                let prior = prior.with_settings_of(&plan);
                self.update(&prior, plan).await
            }
            Err(error::Error::NotFound { .. }) => {
                info!("{} '{}' no longer exists and will be created", K::KIND, id);
                self.create(plan).await
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the object of `state` and wait for it to disappear according to
    /// `state.deletion_wait`. If the wait times out the object has still been asked to go away.
    pub async fn delete(&self, state: &ResourceState<K::Spec>) -> Result<WaitOutcome> {
        let id = state.identity();
        info!("deleting {} '{}'", K::KIND, id);
        self.client
            .delete(&id, state.deletion_propagation)
            .await
            .context(error::ClientSnafu {
                action: format!("delete {} '{}'", K::KIND, id),
            })?;
        wait_for_deletion(&self.client, &id, &state.deletion_wait)
            .await
            .context(error::WaitSnafu)
    }

    /// Import an existing object from an id of the form `namespace/name`.
    pub async fn import(&self, id: &str) -> Result<ResourceState<K::Spec>> {
        let identity = ResourceIdentity::parse(id).context(error::IdentitySnafu)?;
        info!("importing {} '{}'", K::KIND, identity);
        self.fetch(&identity).await
    }

    /// Fetch an existing object, failing if it does not exist.
    pub async fn lookup(&self, identity: &ResourceIdentity) -> Result<ResourceState<K::Spec>> {
        identity.validate().context(error::IdentitySnafu)?;
        self.fetch(identity).await
    }

    async fn fetch(&self, identity: &ResourceIdentity) -> Result<ResourceState<K::Spec>> {
        let object = self
            .client
            .get(identity)
            .await
            .context(error::ClientSnafu {
                action: format!("get {} '{}'", K::KIND, identity),
            })?
            .context(error::NotFoundSnafu {
                kind: K::KIND,
                identity: identity.clone(),
            })?;
        Ok(ResourceState::from_object(object))
    }

    async fn apply(
        &self,
        id: &ResourceIdentity,
        plan: ResourceState<K::Spec>,
        action: &str,
    ) -> Result<ResourceState<K::Spec>> {
        let params = self.apply_params(&plan);
        let object: K = plan.to_object();
        let applied = self
            .client
            .patch(id, &object, &params)
            .await
            .context(error::ClientSnafu {
                action: format!("{} {} '{}'", action, K::KIND, id),
            })?;
        debug!(
            "{} '{}' applied, resource version {:?}",
            K::KIND,
            applied.identity(),
            applied.object_meta().resource_version
        );
        Ok(ResourceState::from_object(applied).with_settings_of(&plan))
    }
}

/// Render `state` as the Kubernetes manifest that `create` would apply, without contacting a
/// cluster.
pub fn render_manifest<K>(state: &ResourceState<K::Spec>) -> Result<String>
where
    K: CamelResource,
{
    let object: K = state.to_object();
    object.to_yaml().context(error::ManifestSnafu {
        kind: K::KIND,
        identity: state.identity(),
    })
}

fn validated_identity<S>(state: &ResourceState<S>) -> Result<ResourceIdentity> {
    let id = state.identity();
    id.validate().context(error::IdentitySnafu)?;
    Ok(id)
}
