pub(crate) mod mock;

use camelk_model::camel::{
    Endpoint, Integration, IntegrationSpec, Kamelet, KameletSpec, ObjectReference, Pipe,
    PipeSpec, SourceSpec,
};
use camelk_model::clients::{ApplyParams, HttpStatusCode, StatusCode};
use camelk_model::resources::{render_manifest, Error, ResourceManager, ResourceState};
use camelk_model::wait::{self, WaitOutcome};
use camelk_model::{DeletionPropagation, ProviderConfig, ResourceIdentity, WaitSpec};
use maplit::btreemap;
use mock::{DeleteCall, MemoryClient};
use serde_json::json;

fn integration_plan() -> ResourceState<IntegrationSpec> {
    let mut plan = ResourceState::new(
        "camel-k",
        "hello",
        IntegrationSpec {
            sources: vec![SourceSpec {
                name: Some("hello.yaml".into()),
                content: Some("- from:\n    uri: timer:tick\n    steps:\n      - to: log:info\n".into()),
                ..SourceSpec::default()
            }],
            ..IntegrationSpec::default()
        },
    );
    plan.metadata.labels = Some(btreemap! {"app".to_string() => "hello".to_string()});
    plan
}

fn manager<K>(client: MemoryClient<K>) -> ResourceManager<MemoryClient<K>>
where
    K: camelk_model::CamelResource,
{
    ResourceManager::new(client, ProviderConfig::default())
}

#[tokio::test]
async fn create_applies_with_provider_defaults() {
    let manager = manager(MemoryClient::<Integration>::new());
    let state = manager.create(integration_plan()).await.unwrap();

    assert_eq!(state.id.as_deref(), Some("camel-k/hello"));
    assert_eq!(state.metadata.labels, integration_plan().metadata.labels);
    assert_eq!(state.spec, integration_plan().spec);
    assert_eq!(
        manager.client().applies.lock().unwrap().as_slice(),
        &[ApplyParams {
            field_manager: "camelk".into(),
            force: false
        }]
    );
    let stored = manager
        .client()
        .stored(&ResourceIdentity::new("camel-k", "hello"))
        .unwrap();
    assert_eq!(stored.metadata.resource_version.as_deref(), Some("1"));
}

#[tokio::test]
async fn state_settings_override_provider_config() {
    let config = ProviderConfig {
        field_manager: "terraform".into(),
        force_conflicts: true,
        ..ProviderConfig::default()
    };
    let manager = ResourceManager::new(MemoryClient::<Integration>::new(), config);

    let mut plan = integration_plan();
    assert_eq!(
        manager.apply_params(&plan),
        ApplyParams {
            field_manager: "terraform".into(),
            force: true
        }
    );

    plan.field_manager = Some("ci".into());
    plan.force_conflicts = Some(false);
    let state = manager.create(plan).await.unwrap();
    assert_eq!(state.field_manager.as_deref(), Some("ci"));
    assert_eq!(state.force_conflicts, Some(false));
    assert_eq!(
        manager.client().applies.lock().unwrap().last().unwrap(),
        &ApplyParams {
            field_manager: "ci".into(),
            force: false
        }
    );
}

#[tokio::test]
async fn conflicts_need_force() {
    let manager = manager(MemoryClient::<Integration>::new().with_owner("kubectl"));
    let err = manager.create(integration_plan()).await.unwrap_err();
    match &err {
        Error::Client { source, .. } => assert!(source.is_status_code(StatusCode::CONFLICT)),
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("create Integration 'camel-k/hello'"));

    let mut plan = integration_plan();
    plan.force_conflicts = Some(true);
    assert!(manager.create(plan).await.is_ok());
}

#[tokio::test]
async fn create_rejects_invalid_names() {
    let manager = manager(MemoryClient::<Integration>::new());
    let plan = ResourceState::new("camel-k", "Hello_World", IntegrationSpec::default());
    let err = manager.create(plan).await.unwrap_err();
    assert!(matches!(err, Error::Identity { .. }), "{}", err);
    assert!(manager.client().applies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn read_refreshes_and_detects_removal() {
    let manager = manager(MemoryClient::<Integration>::new());
    let mut state = manager.create(integration_plan()).await.unwrap();
    state.deletion_wait = WaitSpec::new(0, 0);

    // Someone else changes the object.
    let id = state.identity();
    let mut changed = manager.client().stored(&id).unwrap();
    changed.spec.replicas = Some(3);
    manager.client().insert(changed);

    let refreshed = manager.read(&state).await.unwrap().unwrap();
    assert_eq!(refreshed.spec.replicas, Some(3));
    assert_eq!(refreshed.deletion_wait, WaitSpec::new(0, 0));

    manager.delete(&state).await.unwrap();
    assert!(manager.read(&state).await.unwrap().is_none());
}

#[tokio::test]
async fn update_applies_changes() {
    let manager = manager(MemoryClient::<Integration>::new());
    let prior = manager.create(integration_plan()).await.unwrap();

    let mut plan = prior.clone();
    plan.spec.dependencies = vec!["camel:http".into()];
    let state = manager.update(&prior, plan).await.unwrap();
    assert_eq!(state.spec.dependencies, vec!["camel:http".to_string()]);

    let stored = manager.client().stored(&prior.identity()).unwrap();
    assert_eq!(stored.metadata.resource_version.as_deref(), Some("2"));
}

#[tokio::test]
async fn update_cannot_rename() {
    let manager = manager(MemoryClient::<Integration>::new());
    let prior = manager.create(integration_plan()).await.unwrap();

    let mut plan = prior.clone();
    plan.metadata.name = "hello-renamed".into();
    let err = manager.update(&prior, plan).await.unwrap_err();
    assert!(matches!(err, Error::RequiresReplacement { .. }), "{}", err);
    assert_eq!(manager.client().applies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_forwards_propagation_and_checks_once_without_timeout() {
    let manager = manager(MemoryClient::<Integration>::new().with_linger_checks(5));
    let mut state = manager.create(integration_plan()).await.unwrap();
    state.deletion_propagation = Some(DeletionPropagation::Foreground);
    state.deletion_wait = WaitSpec::new(0, 5);

    let outcome = manager.delete(&state).await.unwrap();
    assert_eq!(outcome, WaitOutcome::StillPresent);
    assert_eq!(manager.client().get_count(), 1);
    assert_eq!(
        manager.client().deletes.lock().unwrap().as_slice(),
        &[DeleteCall {
            id: ResourceIdentity::new("camel-k", "hello"),
            propagation: Some(DeletionPropagation::Foreground),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn delete_waits_for_finalizers() {
    let manager = manager(MemoryClient::<Integration>::new().with_linger_checks(2));
    let state = manager.create(integration_plan()).await.unwrap();

    let start = tokio::time::Instant::now();
    let outcome = manager.delete(&state).await.unwrap();
    assert_eq!(outcome, WaitOutcome::Deleted);
    // Two checks see the object, the third finds it gone.
    assert_eq!(manager.client().get_count(), 3);
    assert_eq!(start.elapsed(), std::time::Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn delete_times_out() {
    let manager = manager(MemoryClient::<Integration>::new().with_linger_checks(100));
    let mut state = manager.create(integration_plan()).await.unwrap();
    state.deletion_wait = WaitSpec::new(10, 5);

    let err = manager.delete(&state).await.unwrap_err();
    assert!(
        matches!(
            err,
            Error::Wait {
                source: wait::Error::TimeoutExceeded { .. }
            }
        ),
        "{}",
        err
    );
    assert_eq!(manager.client().get_count(), 3);
    // The delete request was still made.
    assert_eq!(manager.client().deletes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_missing_object_succeeds() {
    let manager = manager(MemoryClient::<Integration>::new());
    let state = integration_plan();
    assert_eq!(manager.delete(&state).await.unwrap(), WaitOutcome::Deleted);
    assert_eq!(manager.delete(&state).await.unwrap(), WaitOutcome::Deleted);
}

#[tokio::test]
async fn wait_aborts_on_transport_errors() {
    let mut client = MemoryClient::<Integration>::new();
    client.broken = true;
    let manager = manager(client);
    let err = manager.delete(&integration_plan()).await.unwrap_err();
    assert!(
        matches!(
            err,
            Error::Wait {
                source: wait::Error::Check { .. }
            }
        ),
        "{}",
        err
    );
}

#[tokio::test]
async fn import_existing_object() {
    let client = MemoryClient::<Kamelet>::new();
    let mut kamelet = Kamelet::new(
        "timer-source",
        KameletSpec {
            dependencies: vec!["camel:timer".into()],
            ..KameletSpec::default()
        },
    );
    kamelet.metadata.namespace = Some("camel-k".into());
    client.insert(kamelet);
    let manager = manager(client);

    let state = manager.import("camel-k/timer-source").await.unwrap();
    assert_eq!(state.id.as_deref(), Some("camel-k/timer-source"));
    assert_eq!(state.spec.dependencies, vec!["camel:timer".to_string()]);
    assert_eq!(state.deletion_wait, WaitSpec::default());
    assert_eq!(state.field_manager, None);

    let looked_up = manager
        .lookup(&ResourceIdentity::new("camel-k", "timer-source"))
        .await
        .unwrap();
    assert_eq!(looked_up, state);
}

#[tokio::test]
async fn import_and_lookup_missing_objects() {
    let manager = manager(MemoryClient::<Kamelet>::new());
    let err = manager.import("camel-k/nope").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "{}", err);
    assert_eq!(err.to_string(), "Unable to find Kamelet 'camel-k/nope'");

    let err = manager
        .lookup(&ResourceIdentity::new("camel-k", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let err = manager.import("nope").await.unwrap_err();
    assert!(matches!(err, Error::Identity { .. }));
    assert_eq!(manager.client().get_count(), 2);
}

#[test]
fn manifest_rendering() {
    let plan = ResourceState::new(
        "camel-k",
        "timer-to-log",
        PipeSpec {
            source: Some(Endpoint {
                ref_: Some(ObjectReference {
                    api_version: Some("camel.apache.org/v1".into()),
                    kind: Some("Kamelet".into()),
                    name: Some("timer-source".into()),
                    namespace: None,
                }),
                properties: Some(
                    json!({"message": "hello"})
                        .as_object()
                        .cloned()
                        .unwrap(),
                ),
                ..Endpoint::default()
            }),
            sink: Some(Endpoint {
                uri: Some("log:info".into()),
                ..Endpoint::default()
            }),
            ..PipeSpec::default()
        },
    );
    let manifest = render_manifest::<Pipe>(&plan).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&manifest).unwrap();
    assert_eq!(value["apiVersion"].as_str(), Some("camel.apache.org/v1"));
    assert_eq!(value["kind"].as_str(), Some("Pipe"));
    assert_eq!(value["metadata"]["name"].as_str(), Some("timer-to-log"));
    assert_eq!(value["metadata"]["namespace"].as_str(), Some("camel-k"));
    assert_eq!(
        value["spec"]["source"]["ref"]["name"].as_str(),
        Some("timer-source")
    );
    assert_eq!(value["spec"]["sink"]["uri"].as_str(), Some("log:info"));
    assert!(value["status"].is_null());
}

#[tokio::test]
async fn apply_state_creates_without_an_id() {
    let manager = manager(MemoryClient::<Integration>::new());
    let state = manager.apply_state(integration_plan()).await.unwrap();
    assert_eq!(state.id.as_deref(), Some("camel-k/hello"));
    assert_eq!(manager.client().get_count(), 0);
    assert_eq!(manager.client().applies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn apply_state_updates_an_existing_object() {
    let manager = manager(MemoryClient::<Integration>::new());
    let mut plan = manager.create(integration_plan()).await.unwrap();
    plan.spec.replicas = Some(2);

    let state = manager.apply_state(plan).await.unwrap();
    assert_eq!(state.spec.replicas, Some(2));
    let stored = manager
        .client()
        .stored(&ResourceIdentity::new("camel-k", "hello"))
        .unwrap();
    assert_eq!(stored.metadata.resource_version.as_deref(), Some("2"));
    assert_eq!(manager.client().get_count(), 1);
}

#[tokio::test]
async fn apply_state_recreates_a_vanished_object() {
    let manager = manager(MemoryClient::<Integration>::new());
    let mut plan = integration_plan();
    plan.id = Some("camel-k/hello".into());

    let state = manager.apply_state(plan).await.unwrap();
    assert_eq!(state.id.as_deref(), Some("camel-k/hello"));
    let stored = manager
        .client()
        .stored(&ResourceIdentity::new("camel-k", "hello"))
        .unwrap();
    assert_eq!(stored.metadata.resource_version.as_deref(), Some("1"));
}

#[tokio::test]
async fn apply_state_rejects_a_rename() {
    let manager = manager(MemoryClient::<Integration>::new());
    let mut plan = manager.create(integration_plan()).await.unwrap();
    plan.metadata.name = "hello-renamed".into();

    let err = manager.apply_state(plan).await.unwrap_err();
    assert!(matches!(err, Error::RequiresReplacement { .. }), "{}", err);
    assert_eq!(manager.client().applies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn apply_state_rejects_a_malformed_id() {
    let manager = manager(MemoryClient::<Integration>::new());
    let mut plan = integration_plan();
    plan.id = Some("hello".into());

    let err = manager.apply_state(plan).await.unwrap_err();
    assert!(matches!(err, Error::Identity { .. }), "{}", err);
    assert!(manager.client().applies.lock().unwrap().is_empty());
    assert_eq!(manager.client().get_count(), 0);
}
