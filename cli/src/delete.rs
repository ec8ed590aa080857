use crate::provider::Provider;
use anyhow::{Context, Result};
use camelk_model::constants::{DEFAULT_DELETE_POLL_INTERVAL_SECS, DEFAULT_DELETE_TIMEOUT_SECS};
use camelk_model::resources::ResourceState;
use camelk_model::wait::WaitOutcome;
use camelk_model::{CamelKind, CamelResource, DeletionPropagation, ResourceIdentity, WaitSpec};
use clap::Parser;

/// Delete an object and wait for it to disappear.
#[derive(Debug, Parser)]
pub(crate) struct Delete {
    /// The kind of object, e.g. `integration` or `pipe`.
    kind: CamelKind,

    /// The object as `namespace/name`.
    id: ResourceIdentity,

    /// How many seconds to wait for the object to disappear. With 0 the object is checked once.
    #[clap(long = "timeout", default_value_t = DEFAULT_DELETE_TIMEOUT_SECS)]
    timeout: u64,

    /// How many seconds to wait between checks.
    #[clap(long = "poll-interval", default_value_t = DEFAULT_DELETE_POLL_INTERVAL_SECS)]
    poll_interval: u64,

    /// Whether dependents are deleted [Orphan|Background|Foreground]. The server decides when
    /// omitted.
    #[clap(long = "propagation")]
    propagation: Option<DeletionPropagation>,
}

impl Delete {
    pub(crate) async fn run(self, provider: &Provider) -> Result<()> {
        with_kind!(self.kind, K => self.delete::<K>(provider).await)
    }

    async fn delete<K>(&self, provider: &Provider) -> Result<()>
    where
        K: CamelResource,
    {
        let manager = provider.manager::<K>().await?;
        let mut state = ResourceState::<K::Spec>::new(
            &self.id.namespace,
            &self.id.name,
            K::Spec::default(),
        );
        state.deletion_propagation = self.propagation;
        state.deletion_wait = WaitSpec::new(self.timeout, self.poll_interval);

        println!("Deleting {} '{}'", K::KIND, self.id);
        let outcome = manager
            .delete(&state)
            .await
            .context(format!("Unable to delete {} '{}'", K::KIND, self.id))?;
        match outcome {
            WaitOutcome::Deleted => println!("{} '{}' has been deleted", K::KIND, self.id),
            WaitOutcome::StillPresent => println!(
                "{} '{}' has been marked for deletion but still exists",
                K::KIND,
                self.id
            ),
        }
        Ok(())
    }
}
