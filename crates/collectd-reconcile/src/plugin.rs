//! Plugin reconcile path
//!
//! Handles both directions of a plugin's lifecycle: on create/update the
//! plugin is folded into the rendered configuration and guarded with a
//! finalizer; on deletion the configuration is rebuilt without the plugin
//! before the finalizer is cleared and the cluster may collect it.

use collectd_conf::{SynthesizedConf, strlist};
use collectd_store::{COLLECTD_FINALIZER, PluginResource};

use crate::context::ReconcilerContext;
use crate::error::Result;
use crate::report::ReconcileReport;

impl ReconcilerContext {
    /// Reconcile after a change to a single plugin resource.
    ///
    /// Holds the phase lock for the whole synthesize-and-push sequence.
    /// `name` is the plugin resource's object name; NotFound propagates
    /// when the resource is already gone.
    pub fn reconcile_plugin(&self, namespace: &str, name: &str) -> Result<ReconcileReport> {
        let _phase = self.enter_phase();
        tracing::debug!(namespace, plugin = name, "plugin reconcile pass");

        let plugin = self.store().get_plugin(namespace, name)?;
        if plugin.marked_for_deletion {
            self.finalize_plugin(namespace, plugin)
        } else {
            self.apply_plugin(namespace, plugin)
        }
    }

    fn apply_plugin(&self, namespace: &str, mut plugin: PluginResource) -> Result<ReconcileReport> {
        // The finalizer must be registered before the plugin can enter the
        // rendered configuration.
        let mut registered = None;
        if !strlist::contains(&plugin.finalizers, COLLECTD_FINALIZER) {
            plugin.finalizers.push(COLLECTD_FINALIZER.to_string());
            self.store().update_plugin(&plugin)?;
            tracing::debug!(namespace, plugin = %plugin.name, "registered finalizer");
            registered = Some(format!("Registered finalizer on {}", plugin.name));
        }

        let snapshot = self.snapshot(namespace)?;
        let conf = SynthesizedConf::build(snapshot.global_options(), &snapshot.fragments(), None);
        let mut report = self.push_if_changed(namespace, conf)?;
        if let Some(action) = registered {
            report = report.with_action(action);
        }
        Ok(report)
    }

    fn finalize_plugin(
        &self,
        namespace: &str,
        mut plugin: PluginResource,
    ) -> Result<ReconcileReport> {
        tracing::debug!(namespace, plugin = %plugin.name, "deletion pass");

        // The plugin may still be visible in the listing; the exclusion
        // models the configuration immediately after its removal.
        let snapshot = self.snapshot(namespace)?;
        let conf = SynthesizedConf::build(
            snapshot.global_options(),
            &snapshot.fragments(),
            Some(plugin.plugin_name.as_str()),
        );
        let mut report = self.push_if_changed(namespace, conf)?;

        if strlist::contains(&plugin.finalizers, COLLECTD_FINALIZER) {
            plugin.finalizers = strlist::remove_all(&plugin.finalizers, COLLECTD_FINALIZER);
            self.store().update_plugin(&plugin)?;
            tracing::debug!(namespace, plugin = %plugin.name, "cleared finalizer");
            report = report.with_action(format!("Cleared finalizer on {}", plugin.name));
        }
        Ok(report)
    }
}
