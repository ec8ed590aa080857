use crate::constants::DEFAULT_NAMESPACE;
use crate::{CamelResource, DeletionPropagation, ResourceIdentity, WaitSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The declarative document a caller keeps for one managed Camel-K object. `spec` is the spec type
/// of the object's kind, e.g. `IntegrationSpec`.
///
/// Only `metadata` is required when deserializing. Everything else falls back to its default, so a
/// minimal state file looks like this:
///
/// ```yaml
/// metadata:
///   name: timer-to-log
///   namespace: camel-k
/// spec:
///   sink:
///     uri: log:info
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "S: Deserialize<'de> + Default")
)]
pub struct ResourceState<S> {
    /// `namespace/name`, computed after every successful operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Overrides `ProviderConfig::field_manager` for this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
    /// Overrides `ProviderConfig::force_conflicts` for this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,
    /// Sent with the delete request. The server default applies when this is `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_propagation: Option<DeletionPropagation>,
    /// How long to wait for the object to disappear after it is deleted.
    #[serde(default)]
    pub deletion_wait: WaitSpec,
    pub metadata: StateMetadata,
    #[serde(default)]
    pub spec: S,
}

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateMetadata {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StateMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            namespace: default_namespace(),
            labels: None,
            annotations: None,
        }
    }
}

impl<S> ResourceState<S> {
    /// A state for `namespace/name` with default operation settings.
    pub fn new<S1, S2>(namespace: S1, name: S2, spec: S) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            id: None,
            field_manager: None,
            force_conflicts: None,
            deletion_propagation: None,
            deletion_wait: WaitSpec::default(),
            metadata: StateMetadata {
                name: name.into(),
                namespace: namespace.into(),
                ..StateMetadata::default()
            },
            spec,
        }
    }

    pub fn identity(&self) -> ResourceIdentity {
        ResourceIdentity::new(&self.metadata.namespace, &self.metadata.name)
    }

    /// Build the Kubernetes object this state describes. Empty label and annotation maps are left
    /// out so that server-side apply does not claim them.
    pub fn to_object<K>(&self) -> K
    where
        K: CamelResource<Spec = S>,
        S: Clone,
    {
        let metadata = ObjectMeta {
            name: Some(self.metadata.name.clone()),
            namespace: Some(self.metadata.namespace.clone()),
            labels: self.metadata.labels.clone().filter(|m| !m.is_empty()),
            annotations: self.metadata.annotations.clone().filter(|m| !m.is_empty()),
            ..ObjectMeta::default()
        };
        K::from_parts(metadata, self.spec.clone())
    }

    /// Convert an object returned by the server into state. The operation settings are left at
    /// their defaults, see `with_settings_of`.
    pub fn from_object<K>(object: K) -> Self
    where
        K: CamelResource<Spec = S>,
    {
        let identity = object.identity();
        let (metadata, spec) = object.into_parts();
        let mut state = Self::new(identity.namespace.clone(), identity.name.clone(), spec);
        state.id = Some(identity.to_string());
        state.metadata.labels = metadata.labels.filter(|m| !m.is_empty());
        state.metadata.annotations = metadata.annotations.filter(|m| !m.is_empty());
        state
    }

    /// Carry the caller's operation settings over from `other`. These never come from the server.
    pub fn with_settings_of<T>(mut self, other: &ResourceState<T>) -> Self {
        self.field_manager = other.field_manager.clone();
        self.force_conflicts = other.force_conflicts;
        self.deletion_propagation = other.deletion_propagation;
        self.deletion_wait = other.deletion_wait;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::camel::{Endpoint, Pipe, PipeSpec};
    use maplit::btreemap;

    fn pipe_state() -> ResourceState<PipeSpec> {
        let mut state = ResourceState::new(
            "camel-k",
            "timer-to-log",
            PipeSpec {
                sink: Some(Endpoint {
                    uri: Some("log:info".into()),
                    ..Endpoint::default()
                }),
                ..PipeSpec::default()
            },
        );
        state.metadata.labels = Some(btreemap! {"team".to_string() => "integration".to_string()});
        state.metadata.annotations = Some(BTreeMap::new());
        state
    }

    #[test]
    fn state_to_object() {
        let pipe: Pipe = pipe_state().to_object();
        assert_eq!(pipe.metadata.name.as_deref(), Some("timer-to-log"));
        assert_eq!(pipe.metadata.namespace.as_deref(), Some("camel-k"));
        assert_eq!(pipe.metadata.labels.as_ref().unwrap()["team"], "integration");
        assert!(pipe.metadata.annotations.is_none());
        assert!(pipe.status.is_none());
        assert_eq!(
            pipe.spec.sink.unwrap().uri.as_deref(),
            Some("log:info")
        );
    }

    #[test]
    fn object_to_state() {
        let mut pipe: Pipe = pipe_state().to_object();
        pipe.metadata.uid = Some("1234".into());
        pipe.metadata.resource_version = Some("77".into());
        let state = ResourceState::from_object(pipe);
        assert_eq!(state.id.as_deref(), Some("camel-k/timer-to-log"));
        assert_eq!(state.metadata.labels, pipe_state().metadata.labels);
        assert_eq!(state.metadata.annotations, None);
        assert_eq!(state.spec, pipe_state().spec);
        assert_eq!(state.deletion_wait, WaitSpec::default());
    }

    #[test]
    fn settings_are_carried_over() {
        let mut plan = pipe_state();
        plan.field_manager = Some("ci".into());
        plan.force_conflicts = Some(true);
        plan.deletion_propagation = Some(DeletionPropagation::Foreground);
        plan.deletion_wait = WaitSpec::new(0, 1);
        let state = ResourceState::from_object::<Pipe>(plan.to_object()).with_settings_of(&plan);
        assert_eq!(state.field_manager.as_deref(), Some("ci"));
        assert_eq!(state.force_conflicts, Some(true));
        assert_eq!(
            state.deletion_propagation,
            Some(DeletionPropagation::Foreground)
        );
        assert_eq!(state.deletion_wait, WaitSpec::new(0, 1));
    }

    #[test]
    fn minimal_state_yaml() {
        let state: ResourceState<PipeSpec> =
            serde_yaml::from_str("metadata:\n  name: timer-to-log\n").unwrap();
        assert_eq!(state.metadata.namespace, "default");
        assert_eq!(state.spec, PipeSpec::default());
        assert_eq!(state.deletion_wait, WaitSpec::new(30, 5));
        assert_eq!(state.id, None);
    }

    #[test]
    fn state_yaml_with_settings() {
        let state: ResourceState<PipeSpec> = serde_yaml::from_str(
            r#"
id: camel-k/timer-to-log
forceConflicts: true
deletionPropagation: Background
deletionWait:
  timeoutSeconds: 60
metadata:
  name: timer-to-log
  namespace: camel-k
spec:
  source:
    ref:
      kind: Kamelet
      apiVersion: camel.apache.org/v1
      name: timer-source
"#,
        )
        .unwrap();
        assert_eq!(state.identity().to_string(), "camel-k/timer-to-log");
        assert_eq!(state.force_conflicts, Some(true));
        assert_eq!(
            state.deletion_propagation,
            Some(DeletionPropagation::Background)
        );
        assert_eq!(state.deletion_wait, WaitSpec::new(60, 5));
        let source = state.spec.source.unwrap();
        assert_eq!(
            source.ref_.unwrap().name.as_deref(),
            Some("timer-source")
        );
    }
}
