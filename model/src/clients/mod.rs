/*!

This module provides the `ResourceClient` capability and its Kubernetes-backed implementation.

!*/

mod error;
mod http_status_code;
mod kube_client;
mod resource_client;

pub use error::{Error, Result};
pub use http_status_code::{AllowNotFound, HttpStatusCode, StatusCode};
pub use kube_client::{k8s_client, KubeResourceClient};
pub use resource_client::{ApplyParams, ResourceClient};
