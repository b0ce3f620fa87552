//! Reconciler context owning the serialization locks
//!
//! The two mutexes that were ambient process-wide state in earlier
//! renditions of this operator are owned by the context here, so the
//! mutual-exclusion contract is visible at every call site and testable
//! without global state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use collectd_conf::{Fragment, SynthesizedConf};
use collectd_store::{
    COLLECTD_CONF_KEY, ConfigResource, ConfigStore, GlobalSettings, LabelSelector, PluginResource,
    resolve_watch_label,
};

use crate::error::Result;
use crate::report::ReconcileReport;

/// Coordinates reconciliation passes against a shared configuration
/// resource.
///
/// Holds the store handle, the watch-label selector scoping every lookup,
/// and the two exclusive locks described in the module docs.
pub struct ReconcilerContext {
    store: Arc<dyn ConfigStore>,
    watch_label: LabelSelector,
    /// Serializes fetches of the shared configuration resource so a reader
    /// never observes a torn update from a concurrent writer.
    config_lock: Mutex<()>,
    /// Serializes the global-triggered and plugin-triggered reconcile
    /// phases. Interleaving them could push a configuration computed from
    /// stale plugin data immediately after a fresher one.
    phase_lock: Mutex<()>,
}

impl ReconcilerContext {
    pub fn new(store: Arc<dyn ConfigStore>, watch_label: LabelSelector) -> Self {
        Self {
            store,
            watch_label,
            config_lock: Mutex::new(()),
            phase_lock: Mutex::new(()),
        }
    }

    /// Create a context scoped to the watch label resolved from the
    /// environment; falls back to the documented default selector when the
    /// variable is unset.
    pub fn from_env(store: Arc<dyn ConfigStore>) -> Self {
        let selector = LabelSelector::parse(&resolve_watch_label());
        Self::new(store, selector)
    }

    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    pub fn watch_label(&self) -> &LabelSelector {
        &self.watch_label
    }

    /// Fetch the shared configuration resource under the config lock.
    ///
    /// Blocks until the lock is free; there is no timeout. Forward progress
    /// under contention relies on the controller framework's retry
    /// semantics.
    pub fn config_resource(&self, namespace: &str) -> Result<ConfigResource> {
        let _guard = lock_unpoisoned(&self.config_lock);
        tracing::debug!(namespace, "fetching configuration resource");
        Ok(self.store.get_config_resource(namespace, &self.watch_label)?)
    }

    /// Acquire the reconcile-phase lock for the duration of one
    /// synthesize-and-push sequence.
    pub(crate) fn enter_phase(&self) -> MutexGuard<'_, ()> {
        lock_unpoisoned(&self.phase_lock)
    }

    /// Read the complete snapshot one reconciliation pass computes from.
    ///
    /// A NotFound from the plugin listing means an empty namespace, not a
    /// failure; every other store error propagates before synthesis begins,
    /// so a pass never computes from a partial view.
    pub(crate) fn snapshot(&self, namespace: &str) -> Result<ReconcileSnapshot> {
        let global = self.store.get_global_settings(namespace)?;
        let plugins = match self.store.list_plugins(namespace) {
            Ok(plugins) => plugins,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(
            namespace,
            plugins = plugins.len(),
            has_global = global.is_some(),
            "read reconcile snapshot"
        );
        Ok(ReconcileSnapshot { global, plugins })
    }

    /// Compare the rendered configuration against the applied fingerprint
    /// and write it back only when it moved.
    pub(crate) fn push_if_changed(
        &self,
        namespace: &str,
        conf: SynthesizedConf,
    ) -> Result<ReconcileReport> {
        let mut resource = self.config_resource(namespace)?;

        if resource.applied_fingerprint() == Some(conf.fingerprint.as_str()) {
            tracing::debug!(namespace, fingerprint = %conf.fingerprint, "configuration unchanged");
            return Ok(ReconcileReport::unchanged(conf.fingerprint));
        }

        resource.apply_conf(conf.text, conf.fingerprint.clone());
        self.store.update_config_resource(&resource)?;
        tracing::info!(namespace, fingerprint = %conf.fingerprint, "pushed updated configuration");

        let mut report = ReconcileReport::pushed(conf.fingerprint)
            .with_action(format!("Updated {} in {}", COLLECTD_CONF_KEY, resource.name));

        let pods = match self.store.list_pods(namespace, &self.watch_label) {
            Ok(pods) => pods,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        for pod in pods {
            report = report.with_action(format!("Pod {pod} must reload the new configuration"));
        }
        Ok(report)
    }
}

/// A complete view of the inputs to one synthesis pass.
pub(crate) struct ReconcileSnapshot {
    pub global: Option<GlobalSettings>,
    pub plugins: Vec<PluginResource>,
}

impl ReconcileSnapshot {
    pub fn global_options(&self) -> Option<&str> {
        self.global.as_ref().map(|g| g.global_options.as_str())
    }

    pub fn fragments(&self) -> Vec<Fragment> {
        self.plugins
            .iter()
            .map(|p| Fragment::new(p.plugin_name.as_str(), p.plugin_conf.as_str()))
            .collect()
    }
}

// A poisoned guard still unlocks; no reconcile state lives inside the guard.
fn lock_unpoisoned<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
