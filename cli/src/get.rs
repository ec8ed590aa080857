use crate::provider::Provider;
use crate::state_file::write_state;
use anyhow::{Context, Result};
use camelk_model::{CamelKind, CamelResource, ResourceIdentity};
use clap::Parser;

/// Print the state of an existing object. Fails if the object does not exist.
#[derive(Debug, Parser)]
pub(crate) struct Get {
    /// The kind of object, e.g. `integration` or `pipe`.
    kind: CamelKind,

    /// The object as `namespace/name`.
    id: ResourceIdentity,
}

impl Get {
    pub(crate) async fn run(self, provider: &Provider) -> Result<()> {
        with_kind!(self.kind, K => self.get::<K>(provider).await)
    }

    async fn get<K>(&self, provider: &Provider) -> Result<()>
    where
        K: CamelResource,
    {
        let manager = provider.manager::<K>().await?;
        let state = manager
            .lookup(&self.id)
            .await
            .context(format!("Unable to get {} '{}'", K::KIND, self.id))?;
        write_state(&state, None)
    }
}
