use crate::camel::common::{Condition, TraitProfile, Traits};
use crate::constants::ANNOTATION_OPERATOR_ID;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The configuration a Camel-K operator applies to every integration it reconciles.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    derive = "Default",
    derive = "PartialEq",
    group = "camel.apache.org",
    kind = "IntegrationPlatform",
    namespaced,
    plural = "integrationplatforms",
    singular = "integrationplatform",
    shortname = "ip",
    status = "IntegrationPlatformStatus",
    version = "v1",
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationPlatformSpec {
    /// Either `Kubernetes` or `OpenShift`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<TraitProfile>,
    /// Build settings: publish strategy, registry, runtime version, Maven, timeouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<Map<String, Value>>,
    /// Kamelet repositories the operator resolves Kamelets from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kamelet: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<Traits>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration: Vec<ConfigurationSpec>,
}

/// A configuration item applied to all integrations of the platform.
#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSpec {
    /// Either `property`, `configmap`, `secret` or `env`.
    #[serde(rename = "type")]
    pub type_: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationPlatformStatus {
    pub phase: Option<String>,
    pub cluster: Option<String>,
    pub profile: Option<TraitProfile>,
    pub version: Option<String>,
    pub info: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub conditions: Vec<Condition>,
    pub observed_generation: Option<i64>,
}

impl IntegrationPlatform {
    /// The id of the operator that owns this platform, from the `camel.apache.org/operator.id`
    /// annotation.
    pub fn operator_id(&self) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(ANNOTATION_OPERATOR_ID))
            .map(String::as_str)
    }
}
