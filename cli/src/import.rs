use crate::provider::Provider;
use crate::state_file::write_state;
use anyhow::{Context, Result};
use camelk_model::{CamelKind, CamelResource};
use clap::{value_parser, Parser};
use std::path::PathBuf;

/// Import an existing object and print a state file for it.
#[derive(Debug, Parser)]
pub(crate) struct Import {
    /// The kind of object, e.g. `integration` or `pipe`.
    kind: CamelKind,

    /// The object as `namespace/name`.
    id: String,

    /// Write the state to this file instead of printing it.
    #[clap(long = "output", short = 'o', value_parser = value_parser!(PathBuf))]
    output: Option<PathBuf>,
}

impl Import {
    pub(crate) async fn run(self, provider: &Provider) -> Result<()> {
        with_kind!(self.kind, K => self.import::<K>(provider).await)
    }

    async fn import<K>(&self, provider: &Provider) -> Result<()>
    where
        K: CamelResource,
    {
        let manager = provider.manager::<K>().await?;
        let state = manager
            .import(&self.id)
            .await
            .context(format!("Unable to import {} '{}'", K::KIND, self.id))?;
        write_state(&state, self.output.as_deref())
    }
}
