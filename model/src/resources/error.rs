use crate::ResourceIdentity;
use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for `ResourceManager`
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum Error {
    #[snafu(display("Unable to {}: {}", action, source))]
    Client {
        action: String,
        source: crate::clients::Error,
    },

    #[snafu(display("{}", source))]
    Identity { source: crate::Error },

    #[snafu(display("Unable to render the manifest for {} '{}': {}", kind, identity, source))]
    Manifest {
        kind: String,
        identity: ResourceIdentity,
        source: serde_yaml::Error,
    },

    #[snafu(display("Unable to find {} '{}'", kind, identity))]
    NotFound {
        kind: String,
        identity: ResourceIdentity,
    },

    #[snafu(display(
        "Unable to update {} '{}' to '{}': changing the name or namespace requires replacing the object",
        kind,
        from,
        to
    ))]
    RequiresReplacement {
        kind: String,
        from: ResourceIdentity,
        to: ResourceIdentity,
    },

    #[snafu(display("{}", source))]
    Wait { source: crate::wait::Error },
}
