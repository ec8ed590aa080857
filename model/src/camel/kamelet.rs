use crate::camel::common::{Condition, SourceSpec};
use crate::constants::LABEL_KAMELET_TYPE;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A Kamelet: a reusable route snippet with a documented set of parameters.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    derive = "Default",
    derive = "PartialEq",
    group = "camel.apache.org",
    kind = "Kamelet",
    namespaced,
    plural = "kamelets",
    singular = "kamelet",
    shortname = "kl",
    status = "KameletStatus",
    version = "v1",
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct KameletSpec {
    /// The JSON schema of the Kamelet parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Map<String, Value>>,
    /// The route template, written in the YAML DSL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceSpec>,
    /// Data types keyed by slot (`in`, `out`, `error`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_types: Option<BTreeMap<String, Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KameletStatus {
    pub phase: Option<String>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub properties: Vec<KameletProperty>,
    #[serde(default, deserialize_with = "crate::schema_utils::null_to_default")]
    pub conditions: Vec<Condition>,
    pub observed_generation: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KameletProperty {
    pub name: String,
    pub default: Option<String>,
}

impl Kamelet {
    /// Whether this Kamelet is a `source`, `sink` or `action`, from the
    /// `camel.apache.org/kamelet.type` label.
    pub fn kamelet_type(&self) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(LABEL_KAMELET_TYPE))
            .map(String::as_str)
    }
}
