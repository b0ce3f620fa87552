//! Store abstraction over the cluster-side resources
//!
//! [`ConfigStore`] is the seam between the reconciler and the cluster API.
//! Implementations must hand back complete snapshots: a reconcile pass
//! either sees the full plugin set for a namespace or fails before
//! synthesis begins. Partial or streaming reads are not permitted.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{Error, ResourceKind, Result};
use crate::labels::LabelSelector;
use crate::model::{ConfigResource, GlobalSettings, PluginResource, PodSummary};

/// Read/write access to the resources one reconcile pass touches.
pub trait ConfigStore: Send + Sync {
    /// List every plugin resource in `namespace`. Implementations may
    /// signal an empty namespace either with an empty vector or with a
    /// NotFound error; callers treat both as "no plugins".
    fn list_plugins(&self, namespace: &str) -> Result<Vec<PluginResource>>;

    /// Fetch a single plugin resource by object name.
    fn get_plugin(&self, namespace: &str, name: &str) -> Result<PluginResource>;

    /// Persist finalizer or spec changes on a plugin resource.
    fn update_plugin(&self, plugin: &PluginResource) -> Result<()>;

    /// Fetch the namespace's global-settings singleton. Absence is a valid
    /// state, not an error.
    fn get_global_settings(&self, namespace: &str) -> Result<Option<GlobalSettings>>;

    /// Fetch the first configuration resource in `namespace` whose labels
    /// match `selector`.
    fn get_config_resource(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<ConfigResource>;

    /// Persist an updated configuration resource.
    fn update_config_resource(&self, resource: &ConfigResource) -> Result<()>;

    /// Names of pods in `namespace` matching `selector`, for restart
    /// signaling after a configuration push.
    fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<String>>;
}

/// In-memory [`ConfigStore`] for tests and cluster-free embeddings.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    plugins: Vec<PluginResource>,
    /// Global-settings singleton per namespace.
    globals: HashMap<String, GlobalSettings>,
    config_resources: Vec<ConfigResource>,
    pods: Vec<PodSummary>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a plugin resource, keyed by (namespace, name).
    pub fn insert_plugin(&self, plugin: PluginResource) {
        let mut state = self.write();
        match state
            .plugins
            .iter_mut()
            .find(|p| p.namespace == plugin.namespace && p.name == plugin.name)
        {
            Some(existing) => *existing = plugin,
            None => state.plugins.push(plugin),
        }
    }

    /// Remove a plugin resource entirely, as the cluster does once the last
    /// finalizer is cleared.
    pub fn remove_plugin(&self, namespace: &str, name: &str) {
        let mut state = self.write();
        state
            .plugins
            .retain(|p| !(p.namespace == namespace && p.name == name));
    }

    /// Insert or replace the namespace's global-settings singleton.
    pub fn insert_global_settings(&self, settings: GlobalSettings) {
        self.write()
            .globals
            .insert(settings.namespace.clone(), settings);
    }

    /// Remove the namespace's global-settings singleton.
    pub fn remove_global_settings(&self, namespace: &str) {
        self.write().globals.remove(namespace);
    }

    /// Insert or replace a configuration resource, keyed by
    /// (namespace, name).
    pub fn insert_config_resource(&self, resource: ConfigResource) {
        let mut state = self.write();
        match state
            .config_resources
            .iter_mut()
            .find(|r| r.namespace == resource.namespace && r.name == resource.name)
        {
            Some(existing) => *existing = resource,
            None => state.config_resources.push(resource),
        }
    }

    pub fn insert_pod(&self, pod: PodSummary) {
        self.write().pods.push(pod);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MemoryState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MemoryState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigStore for MemoryStore {
    fn list_plugins(&self, namespace: &str) -> Result<Vec<PluginResource>> {
        Ok(self
            .read()
            .plugins
            .iter()
            .filter(|p| p.namespace == namespace)
            .cloned()
            .collect())
    }

    fn get_plugin(&self, namespace: &str, name: &str) -> Result<PluginResource> {
        self.read()
            .plugins
            .iter()
            .find(|p| p.namespace == namespace && p.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(ResourceKind::Plugin, namespace))
    }

    fn update_plugin(&self, plugin: &PluginResource) -> Result<()> {
        let mut state = self.write();
        match state
            .plugins
            .iter_mut()
            .find(|p| p.namespace == plugin.namespace && p.name == plugin.name)
        {
            Some(existing) => {
                *existing = plugin.clone();
                Ok(())
            }
            None => Err(Error::not_found(ResourceKind::Plugin, &plugin.namespace)),
        }
    }

    fn get_global_settings(&self, namespace: &str) -> Result<Option<GlobalSettings>> {
        Ok(self.read().globals.get(namespace).cloned())
    }

    fn get_config_resource(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<ConfigResource> {
        self.read()
            .config_resources
            .iter()
            .find(|r| r.namespace == namespace && selector.matches(&r.labels))
            .cloned()
            .ok_or_else(|| Error::not_found(ResourceKind::ConfigResource, namespace))
    }

    fn update_config_resource(&self, resource: &ConfigResource) -> Result<()> {
        let mut state = self.write();
        match state
            .config_resources
            .iter_mut()
            .find(|r| r.namespace == resource.namespace && r.name == resource.name)
        {
            Some(existing) => {
                *existing = resource.clone();
                Ok(())
            }
            None => Err(Error::not_found(
                ResourceKind::ConfigResource,
                &resource.namespace,
            )),
        }
    }

    fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<String>> {
        Ok(self
            .read()
            .pods
            .iter()
            .filter(|p| p.namespace == namespace && selector.matches(&p.labels))
            .map(|p| p.name.clone())
            .collect())
    }
}
