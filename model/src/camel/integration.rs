use crate::camel::common::{Condition, ObjectReference, SourceSpec, TraitProfile, Traits};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Camel-K integration: the routes to run and how to run them.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    derive = "Default",
    derive = "PartialEq",
    group = "camel.apache.org",
    kind = "Integration",
    namespaced,
    plural = "integrations",
    singular = "integration",
    shortname = "it",
    status = "IntegrationStatus",
    version = "v1",
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Kit", "type":"string", "jsonPath":".status.integrationKit.name"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceSpec>,
    /// Routes written in the YAML DSL, embedded directly.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flows: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_kit: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<TraitProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<Traits>,
    /// A pod template merged into the generated deployment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_template: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatus {
    pub phase: Option<String>,
    pub digest: Option<String>,
    pub image: Option<String>,
    pub integration_kit: Option<ObjectReference>,
    pub platform: Option<String>,
    pub profile: Option<TraitProfile>,
    pub replicas: Option<i32>,
    pub runtime_version: Option<String>,
    pub runtime_provider: Option<String>,
    pub selector: Option<String>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub conditions: Vec<Condition>,
    pub observed_generation: Option<i64>,
}

impl Integration {
    /// Has the operator reported the integration as `Running`.
    pub fn is_running(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .map(|phase| phase == "Running")
            .unwrap_or(false)
    }
}
