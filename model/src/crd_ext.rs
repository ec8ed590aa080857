use crate::constants::DEFAULT_NAMESPACE;
use crate::ResourceIdentity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Provides some conveniences for querying a `kube-rs` object.
pub trait CrdExt {
    /// Returns this objects `ObjectMeta` information (i.e. the `metadata` field). You implement
    /// this be returning `&self.metadata`. This allows the rest of this trait's functions to be
    /// implemented for you.
    fn object_meta(&self) -> &ObjectMeta;

    /// Returns the object.metadata.name field, unwrapping a potential `None` with `""`. This is
    /// named `object_name` to avoid confusion with `ResourceExt`.
    fn object_name(&self) -> &str {
        self.object_meta().name.as_deref().unwrap_or("")
    }

    /// Returns the object.metadata.namespace field, or `default` when it is missing.
    fn object_namespace(&self) -> &str {
        self.object_meta()
            .namespace
            .as_deref()
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// The `namespace/name` identity of the object.
    fn identity(&self) -> ResourceIdentity {
        ResourceIdentity::new(self.object_namespace(), self.object_name())
    }

    /// Returns this object's YAML representation as a String.
    fn to_yaml(&self) -> Result<String, serde_yaml::Error>;

    /// Does the object have one or more finalizers.
    fn has_finalizers(&self) -> bool {
        self.object_meta()
            .finalizers
            .as_ref()
            .map(|finalizers| !finalizers.is_empty())
            .unwrap_or(false)
    }

    /// Has someone requested that the object be deleted.
    fn is_delete_requested(&self) -> bool {
        self.object_meta().deletion_timestamp.is_some()
    }
}
