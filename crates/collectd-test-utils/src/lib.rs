//! Shared test utilities for the collectd-conf-manager workspace.
//!
//! This crate provides a standardised store fixture to eliminate
//! duplication across crate test suites. It is a dev-dependency only —
//! never published.

use std::collections::BTreeMap;
use std::sync::Arc;

use collectd_store::{
    COLLECTD_FINALIZER, ConfigResource, DEFAULT_WATCH_LABEL, GlobalSettings, LabelSelector,
    MemoryStore, PluginResource, PodSummary,
};

/// Namespace used by every fixture.
pub const TEST_NAMESPACE: &str = "monitoring";

/// Object name of the seeded configuration resource.
pub const TEST_CONFIG_RESOURCE: &str = "collectd-conf";

/// Builder seeding a [`MemoryStore`] with the objects one reconcile pass
/// reads: a labeled configuration resource plus any plugins, global
/// settings, and pods a test needs.
pub struct StoreFixture {
    store: Arc<MemoryStore>,
}

impl StoreFixture {
    /// Create a fixture whose store already contains an empty configuration
    /// resource matching the default watch label.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        store.insert_config_resource(ConfigResource {
            name: TEST_CONFIG_RESOURCE.to_string(),
            namespace: TEST_NAMESPACE.to_string(),
            labels: watch_labels(),
            ..Default::default()
        });
        Self { store }
    }

    /// Create a fixture with an entirely empty store (no configuration
    /// resource), for NotFound scenarios.
    pub fn empty() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// The selector every fixture resource is labeled with.
    pub fn selector() -> LabelSelector {
        LabelSelector::parse(DEFAULT_WATCH_LABEL)
    }

    /// Add a plugin resource with a registered finalizer.
    pub fn with_plugin(self, plugin_name: &str, plugin_conf: &str) -> Self {
        let mut plugin = PluginResource::new(TEST_NAMESPACE, plugin_name, plugin_conf);
        plugin.finalizers.push(COLLECTD_FINALIZER.to_string());
        self.store.insert_plugin(plugin);
        self
    }

    /// Add a plugin resource that has not been reconciled yet (no
    /// finalizer).
    pub fn with_unregistered_plugin(self, plugin_name: &str, plugin_conf: &str) -> Self {
        self.store
            .insert_plugin(PluginResource::new(TEST_NAMESPACE, plugin_name, plugin_conf));
        self
    }

    /// Add a plugin resource with a deletion timestamp set and the
    /// finalizer still registered.
    pub fn with_deleted_plugin(self, plugin_name: &str, plugin_conf: &str) -> Self {
        let mut plugin = PluginResource::new(TEST_NAMESPACE, plugin_name, plugin_conf);
        plugin.finalizers.push(COLLECTD_FINALIZER.to_string());
        plugin.marked_for_deletion = true;
        self.store.insert_plugin(plugin);
        self
    }

    /// Set the namespace's global-settings singleton.
    pub fn with_global(self, global_options: &str) -> Self {
        self.store.insert_global_settings(GlobalSettings::new(
            TEST_NAMESPACE,
            "collectd-global",
            global_options,
        ));
        self
    }

    /// Add an agent pod matching the watch label.
    pub fn with_pod(self, name: &str) -> Self {
        self.store.insert_pod(PodSummary {
            name: name.to_string(),
            namespace: TEST_NAMESPACE.to_string(),
            labels: watch_labels(),
        });
        self
    }

    pub fn build(self) -> Arc<MemoryStore> {
        self.store
    }
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn watch_labels() -> BTreeMap<String, String> {
    [("app".to_string(), "collectd".to_string())]
        .into_iter()
        .collect()
}
