/*!

This test module provides an in-memory [`ResourceClient`] that stands in for the Kubernetes API so
that the resource lifecycle can be tested without a cluster.

!*/

use camelk_model::clients::{self, ApplyParams, ResourceClient, StatusCode};
use camelk_model::{CamelResource, DeletionPropagation, ResourceIdentity};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A record of one delete request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct DeleteCall {
    pub(crate) id: ResourceIdentity,
    pub(crate) propagation: Option<DeletionPropagation>,
}

/// Keeps objects in a map. Applies fill in a uid and bump the resource version like the API server
/// would. After a delete the object lingers for `linger_checks` further `get` calls, imitating
/// finalizers that take a while to run.
pub(crate) struct MemoryClient<K> {
    objects: Mutex<BTreeMap<ResourceIdentity, K>>,
    /// Number of `get` calls the object survives after being deleted, per object.
    lingering: Mutex<BTreeMap<ResourceIdentity, usize>>,
    linger_checks: usize,
    /// Field manager that owns everything; applying as another manager without `force` conflicts.
    owner: Option<String>,
    pub(crate) applies: Mutex<Vec<ApplyParams>>,
    pub(crate) deletes: Mutex<Vec<DeleteCall>>,
    pub(crate) gets: Mutex<usize>,
    /// Fail every `get` with a transport error.
    pub(crate) broken: bool,
}

impl<K> MemoryClient<K>
where
    K: CamelResource,
{
    pub(crate) fn new() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            lingering: Mutex::new(BTreeMap::new()),
            linger_checks: 0,
            owner: None,
            applies: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            gets: Mutex::new(0),
            broken: false,
        }
    }

    pub(crate) fn with_linger_checks(mut self, linger_checks: usize) -> Self {
        self.linger_checks = linger_checks;
        self
    }

    pub(crate) fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    /// Put an object into the store as if someone else had created it.
    pub(crate) fn insert(&self, mut object: K) {
        let id = object.identity();
        object.meta_mut().namespace = Some(id.namespace.clone());
        self.objects.lock().unwrap().insert(id, object);
    }

    pub(crate) fn stored(&self, id: &ResourceIdentity) -> Option<K> {
        self.objects.lock().unwrap().get(id).cloned()
    }

    pub(crate) fn get_count(&self) -> usize {
        *self.gets.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl<K> ResourceClient for MemoryClient<K>
where
    K: CamelResource,
{
    type Object = K;

    fn kind(&self) -> &'static str {
        K::KIND
    }

    async fn get(&self, id: &ResourceIdentity) -> clients::Result<Option<K>> {
        *self.gets.lock().unwrap() += 1;
        if self.broken {
            return Err(clients::Error::backend_with_status(
                "the server is currently unable to handle the request",
                StatusCode::SERVICE_UNAVAILABLE,
            ));
        }
        let mut lingering = self.lingering.lock().unwrap();
        if let Some(remaining) = lingering.get_mut(id) {
            if *remaining == 0 {
                lingering.remove(id);
                self.objects.lock().unwrap().remove(id);
            } else {
                *remaining -= 1;
            }
        }
        Ok(self.objects.lock().unwrap().get(id).cloned())
    }

    async fn patch(
        &self,
        id: &ResourceIdentity,
        object: &K,
        params: &ApplyParams,
    ) -> clients::Result<K> {
        self.applies.lock().unwrap().push(params.clone());
        if let Some(owner) = &self.owner {
            if owner != &params.field_manager && !params.force {
                return Err(clients::Error::backend_with_status(
                    format!("Apply failed with 1 conflict: conflict with \"{}\"", owner),
                    StatusCode::CONFLICT,
                ));
            }
        }
        let mut objects = self.objects.lock().unwrap();
        let version = objects
            .get(id)
            .and_then(|existing| existing.meta().resource_version.clone())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let mut stored = object.clone();
        let meta = stored.meta_mut();
        meta.uid = Some(format!("uid-{}", id));
        meta.resource_version = Some((version + 1).to_string());
        objects.insert(id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete(
        &self,
        id: &ResourceIdentity,
        propagation: Option<DeletionPropagation>,
    ) -> clients::Result<()> {
        self.deletes.lock().unwrap().push(DeleteCall {
            id: id.clone(),
            propagation,
        });
        if self.objects.lock().unwrap().contains_key(id) {
            if self.linger_checks == 0 {
                self.objects.lock().unwrap().remove(id);
            } else {
                self.lingering
                    .lock()
                    .unwrap()
                    .insert(id.clone(), self.linger_checks);
            }
        }
        Ok(())
    }
}
