use anyhow::{Context, Result};
use camelk_model::resources::ResourceState;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read a YAML state file. `S` is the spec type of the kind the file describes.
pub(crate) fn read_state<S>(path: &Path) -> Result<ResourceState<S>>
where
    S: DeserializeOwned + Default,
{
    let data = std::fs::read_to_string(path)
        .context(format!("Unable to read state file '{}'", path.display()))?;
    serde_yaml::from_str(&data).context(format!(
        "Unable to deserialize state file '{}'",
        path.display()
    ))
}

/// Print `state` to stdout as YAML, or write it to `out` when given.
pub(crate) fn write_state<S>(state: &ResourceState<S>, out: Option<&Path>) -> Result<()>
where
    S: Serialize,
{
    let yaml = serde_yaml::to_string(state).context("Unable to serialize state")?;
    match out {
        Some(path) => std::fs::write(path, yaml)
            .context(format!("Unable to write state file '{}'", path.display())),
        None => {
            print!("{}", yaml);
            Ok(())
        }
    }
}
