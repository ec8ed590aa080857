use crate::provider::Provider;
use crate::state_file::{read_state, write_state};
use anyhow::{Context, Result};
use camelk_model::{CamelKind, CamelResource};
use clap::{value_parser, Parser};
use std::path::PathBuf;

/// Create the object described by a state file, or update it when the state already has an `id`.
/// The resulting state is printed as YAML.
#[derive(Debug, Parser)]
pub(crate) struct Apply {
    /// The kind of object, e.g. `integration` or `pipe`.
    kind: CamelKind,

    /// Path to the YAML state file.
    #[clap(long = "file", short = 'f', value_parser = value_parser!(PathBuf))]
    file: PathBuf,

    /// Write the resulting state back to the state file instead of printing it.
    #[clap(long = "in-place")]
    in_place: bool,
}

impl Apply {
    pub(crate) async fn run(self, provider: &Provider) -> Result<()> {
        with_kind!(self.kind, K => self.apply::<K>(provider).await)
    }

    async fn apply<K>(&self, provider: &Provider) -> Result<()>
    where
        K: CamelResource,
    {
        let plan = read_state::<K::Spec>(&self.file)?;
        let manager = provider.manager::<K>().await?;
        let state = manager
            .apply_state(plan)
            .await
            .context(format!("Unable to apply '{}'", self.file.display()))?;
        let out = if self.in_place {
            Some(self.file.as_path())
        } else {
            None
        };
        write_state(&state, out)
    }
}
