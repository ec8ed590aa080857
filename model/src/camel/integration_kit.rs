use crate::camel::common::{Condition, SourceSpec, TraitProfile, Traits};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A Camel-K integration kit: the container image an integration runs from, along with the
/// dependencies baked into it.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    derive = "Default",
    derive = "PartialEq",
    group = "camel.apache.org",
    kind = "IntegrationKit",
    namespaced,
    plural = "integrationkits",
    singular = "integrationkit",
    shortname = "ik",
    status = "IntegrationKitStatus",
    version = "v1",
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Image", "type":"string", "jsonPath":".status.image"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationKitSpec {
    /// When set, the kit is not built and this image is used as is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<TraitProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<Traits>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationKitStatus {
    pub phase: Option<String>,
    pub base_image: Option<String>,
    pub image: Option<String>,
    pub digest: Option<String>,
    pub platform: Option<String>,
    pub runtime_version: Option<String>,
    pub runtime_provider: Option<String>,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub conditions: Vec<Condition>,
    pub observed_generation: Option<i64>,
}
