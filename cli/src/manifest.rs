use crate::state_file::read_state;
use anyhow::{Context, Result};
use camelk_model::resources::render_manifest;
use camelk_model::{CamelKind, CamelResource};
use clap::{value_parser, Parser};
use std::path::PathBuf;

/// Print the Kubernetes manifest that `apply` would send for a state file. No cluster is
/// contacted.
#[derive(Debug, Parser)]
pub(crate) struct Manifest {
    /// The kind of object, e.g. `integration` or `pipe`.
    kind: CamelKind,

    /// Path to the YAML state file.
    #[clap(long = "file", short = 'f', value_parser = value_parser!(PathBuf))]
    file: PathBuf,
}

impl Manifest {
    pub(crate) fn run(self) -> Result<()> {
        with_kind!(self.kind, K => self.render::<K>())
    }

    fn render<K>(&self) -> Result<()>
    where
        K: CamelResource,
    {
        let state = read_state::<K::Spec>(&self.file)?;
        let manifest = render_manifest::<K>(&state)
            .context(format!("Unable to render '{}'", self.file.display()))?;
        print!("{}", manifest);
        Ok(())
    }
}
