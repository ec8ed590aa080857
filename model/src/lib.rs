/*!

This library provides the Camel-K custom resource definitions, a typed client capability for them,
and the create/read/update/delete/import lifecycle built on server-side apply, including waiting for
deleted objects to disappear.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use camel::{CamelKind, CamelResource};
pub use config::{DeletionPropagation, ProviderConfig, WaitSpec};
pub use crd_ext::CrdExt;
pub use error::{Error, Result};
pub use identity::ResourceIdentity;

pub mod camel;
pub mod clients;
mod config;
pub mod constants;
mod crd_ext;
mod error;
mod identity;
pub mod resources;
mod schema_utils;
pub mod wait;
