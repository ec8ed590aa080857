use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
pub struct Error(OpaqueError);
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum OpaqueError {
    #[snafu(display("Unable to read configuration file '{}': {}", path.display(), source))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Error deserializing configuration '{}': {}", path.display(), source))]
    ConfigDeserialization {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display(
        "Invalid id '{}': expected the form 'namespace/name' with both parts present",
        id
    ))]
    IdentityFormat { id: String },

    #[snafu(display("Invalid name '{}': {}", name, reason))]
    InvalidName { name: String, reason: String },

    #[snafu(display("Invalid namespace '{}': {}", namespace, reason))]
    InvalidNamespace { namespace: String, reason: String },

    #[snafu(display("Parse error: {}", source))]
    SerdePlain { source: serde_plain::Error },
}
