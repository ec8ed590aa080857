/*!

The Camel-K custom resources (`camel.apache.org/v1`) and the `CamelResource` descriptor that lets
the clients and the resource manager work with any of them.

!*/

mod build;
mod common;
mod integration;
mod integration_kit;
mod integration_platform;
mod kamelet;
mod pipe;

pub use build::{Build, BuildConfiguration, BuildPhase, BuildSpec, BuildStatus};
pub use common::{
    Condition, ObjectReference, Repository, RepositoryPolicy, SourceSpec, TraitProfile, Traits,
};
pub use integration::{Integration, IntegrationSpec, IntegrationStatus};
pub use integration_kit::{IntegrationKit, IntegrationKitSpec, IntegrationKitStatus};
pub use integration_platform::{
    ConfigurationSpec, IntegrationPlatform, IntegrationPlatformSpec, IntegrationPlatformStatus,
};
pub use kamelet::{Kamelet, KameletProperty, KameletSpec, KameletStatus};
pub use pipe::{Endpoint, Pipe, PipeSpec, PipeStatus};

use crate::CrdExt;
use core::fmt::Debug;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::NamespaceResourceScope;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Describes one kind of Camel-K object so that it can be moved between a resource state and the
/// typed Kubernetes object.
pub trait CamelResource:
    kube::Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + CrdExt
    + Serialize
    + DeserializeOwned
    + Debug
    + Clone
    + Send
    + Sync
    + 'static
{
    type Spec: Serialize + DeserializeOwned + Debug + Clone + Default + PartialEq + Send + Sync;

    /// The kind as it appears in the object's `kind` field.
    const KIND: &'static str;

    /// The resource type name, e.g. `camel_apache_org_build_v1`.
    const TYPE_NAME: &'static str;

    /// Assemble an object from its metadata and spec. The status is left empty.
    fn from_parts(metadata: ObjectMeta, spec: Self::Spec) -> Self;

    /// Split an object into its metadata and spec, discarding the status.
    fn into_parts(self) -> (ObjectMeta, Self::Spec);
}

macro_rules! camel_resource {
    ($crd:ty, $spec:ty, $kind:literal, $type_name:literal) => {
        impl CrdExt for $crd {
            fn object_meta(&self) -> &ObjectMeta {
                &self.metadata
            }

            fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
                serde_yaml::to_string(self)
            }
        }

        impl CamelResource for $crd {
            type Spec = $spec;
            const KIND: &'static str = $kind;
            const TYPE_NAME: &'static str = $type_name;

            fn from_parts(metadata: ObjectMeta, spec: Self::Spec) -> Self {
                Self {
                    metadata,
                    spec,
                    status: None,
                }
            }

            fn into_parts(self) -> (ObjectMeta, Self::Spec) {
                (self.metadata, self.spec)
            }
        }
    };
}

camel_resource!(Build, BuildSpec, "Build", "camel_apache_org_build_v1");
camel_resource!(
    Integration,
    IntegrationSpec,
    "Integration",
    "camel_apache_org_integration_v1"
);
camel_resource!(
    IntegrationKit,
    IntegrationKitSpec,
    "IntegrationKit",
    "camel_apache_org_integration_kit_v1"
);
camel_resource!(
    IntegrationPlatform,
    IntegrationPlatformSpec,
    "IntegrationPlatform",
    "camel_apache_org_integration_platform_v1"
);
camel_resource!(Kamelet, KameletSpec, "Kamelet", "camel_apache_org_kamelet_v1");
camel_resource!(Pipe, PipeSpec, "Pipe", "camel_apache_org_pipe_v1");

/// `CamelKind` names one of the supported kinds at runtime, e.g. when it comes from the command
/// line. Its string form is the kebab-case kind, such as `integration-platform`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CamelKind {
    Build,
    Integration,
    IntegrationKit,
    IntegrationPlatform,
    Kamelet,
    Pipe,
}

serde_plain::derive_fromstr_from_deserialize!(CamelKind, |e| -> crate::Error {
    crate::error::OpaqueError::SerdePlain { source: e }.into()
});
serde_plain::derive_display_from_serialize!(CamelKind);

impl CamelKind {
    pub const ALL: [CamelKind; 6] = [
        CamelKind::Build,
        CamelKind::Integration,
        CamelKind::IntegrationKit,
        CamelKind::IntegrationPlatform,
        CamelKind::Kamelet,
        CamelKind::Pipe,
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            CamelKind::Build => Build::KIND,
            CamelKind::Integration => Integration::KIND,
            CamelKind::IntegrationKit => IntegrationKit::KIND,
            CamelKind::IntegrationPlatform => IntegrationPlatform::KIND,
            CamelKind::Kamelet => Kamelet::KIND,
            CamelKind::Pipe => Pipe::KIND,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CamelKind::Build => Build::TYPE_NAME,
            CamelKind::Integration => Integration::TYPE_NAME,
            CamelKind::IntegrationKit => IntegrationKit::TYPE_NAME,
            CamelKind::IntegrationPlatform => IntegrationPlatform::TYPE_NAME,
            CamelKind::Kamelet => Kamelet::TYPE_NAME,
            CamelKind::Pipe => Pipe::TYPE_NAME,
        }
    }
}
