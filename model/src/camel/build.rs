use crate::camel::common::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Camel-K build. The `CustomResource` derive also produces a struct named `Build` which
/// represents a build object in the k8s API.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    derive = "Default",
    derive = "PartialEq",
    group = "camel.apache.org",
    kind = "Build",
    namespaced,
    plural = "builds",
    singular = "build",
    shortname = "ikb",
    status = "BuildStatus",
    version = "v1",
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    /// The tasks to execute, in order. Each task is an open object keyed by its type (`builder`,
    /// `package`, `spectrum`, `s2i`, `jib`, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Map<String, Value>>,
    /// Where and how the build runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<BuildConfiguration>,
    /// A duration string such as `5m`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_running_builds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    /// Either `routine` or `pod`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Either `FIFO` or `dependencies`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    #[schemars(schema_with = "crate::schema_utils::nullable_enum::<BuildPhase>")]
    pub phase: BuildPhase,
    pub image: Option<String>,
    pub digest: Option<String>,
    pub base_image: Option<String>,
    pub error: Option<String>,
    pub failure: Option<Map<String, Value>>,
    pub started_at: Option<String>,
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub conditions: Vec<Condition>,
    pub observed_generation: Option<i64>,
}

/// The phase of a build, as reported by the operator.
#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, Copy, JsonSchema)]
pub enum BuildPhase {
    #[default]
    #[serde(rename = "")]
    None,
    Initialization,
    Scheduling,
    Pending,
    Running,
    Succeeded,
    Failed,
    Interrupted,
    Error,
}

impl Build {
    /// The current phase of the build. `None` when the operator has not reported one yet.
    pub fn phase(&self) -> BuildPhase {
        self.status.as_ref().map(|s| s.phase).unwrap_or_default()
    }
}
