use crate::clients::{HttpStatusCode, StatusCode};
use snafu::Snafu;

/// The `Result` type returned by `clients`.
pub type Result<T> = std::result::Result<T, Error>;

/// The public error type returned by `clients`.
#[derive(Debug, Snafu)]
pub struct Error(InnerError);

/// The private error type returned by `clients`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub(crate) enum InnerError {
    #[snafu(display("Error initializing the Kubernetes client: {}", source))]
    Initialization { source: kube::Error },

    #[snafu(display("Unable to read kubeconfig: {}", source))]
    Kubeconfig {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Unable to {} {} '{}': {}", method, what, name, source))]
    KubeApiCall {
        /// The API verb, e.g. 'get'.
        method: String,
        /// The kind of object, e.g. 'Integration'.
        what: String,
        /// The `namespace/name` of the object.
        name: String,
        /// The error from kube-rs.
        source: kube::Error,
    },

    #[snafu(display("{}", message))]
    Backend {
        message: String,
        status_code: Option<StatusCode>,
    },
}

impl Error {
    /// Create an error for `ResourceClient` implementations that are not backed by `kube`.
    pub fn backend<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Error(InnerError::Backend {
            message: message.into(),
            status_code: None,
        })
    }

    /// Like `backend`, but carrying an HTTP status code, e.g. `CONFLICT`.
    pub fn backend_with_status<S>(message: S, status_code: StatusCode) -> Self
    where
        S: Into<String>,
    {
        Error(InnerError::Backend {
            message: message.into(),
            status_code: Some(status_code),
        })
    }
}

impl HttpStatusCode for InnerError {
    fn status_code(&self) -> Option<StatusCode> {
        match self {
            InnerError::Initialization { .. } | InnerError::Kubeconfig { .. } => None,
            InnerError::KubeApiCall { source: e, .. } => e.status_code(),
            InnerError::Backend { status_code, .. } => *status_code,
        }
    }
}

impl HttpStatusCode for Error {
    fn status_code(&self) -> Option<StatusCode> {
        self.0.status_code()
    }
}
