//! Resource model for the objects the operator reconciles
//!
//! Small mirrors of the cluster-side objects: the plugin custom resource,
//! the namespace-wide global-settings singleton, the configuration resource
//! (ConfigMap analogue) that carries the rendered agent configuration, and
//! a pod summary for restart signaling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Data key in the configuration resource holding the rendered text.
pub const COLLECTD_CONF_KEY: &str = "collectd.conf";

/// Annotation recording the fingerprint of the last applied configuration.
pub const FINGERPRINT_ANNOTATION: &str = "collectd-manager.io/conf-fingerprint";

/// Finalizer that delays plugin deletion until the configuration has been
/// rebuilt without the plugin.
pub const COLLECTD_FINALIZER: &str = "finalizer.collectd-manager.io";

/// A collectd plugin custom resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResource {
    /// Object name of the resource.
    pub name: String,
    pub namespace: String,
    /// Plugin name as it appears in the rendered `LoadPlugin` directive.
    /// The reserved name `global` contributes global options instead.
    pub plugin_name: String,
    /// Configuration block for the plugin.
    pub plugin_conf: String,
    /// Finalizers currently registered on the resource.
    #[serde(default)]
    pub finalizers: Vec<String>,
    /// Whether a deletion timestamp is set on the resource.
    #[serde(default)]
    pub marked_for_deletion: bool,
}

impl PluginResource {
    /// Create a plugin resource whose object name matches its plugin name,
    /// the common case for this operator.
    pub fn new(
        namespace: impl Into<String>,
        plugin_name: impl Into<String>,
        plugin_conf: impl Into<String>,
    ) -> Self {
        let plugin_name = plugin_name.into();
        Self {
            name: plugin_name.clone(),
            namespace: namespace.into(),
            plugin_name,
            plugin_conf: plugin_conf.into(),
            finalizers: Vec::new(),
            marked_for_deletion: false,
        }
    }
}

/// The namespace-wide global-settings singleton.
///
/// A structurally present instance with empty `global_options` still counts
/// as present: it is an authoritative empty override, not absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub name: String,
    pub namespace: String,
    /// Free-form global options block.
    pub global_options: String,
}

impl GlobalSettings {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        global_options: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            global_options: global_options.into(),
        }
    }
}

/// The shared configuration resource the rendered text is pushed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResource {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl ConfigResource {
    /// Fingerprint of the last applied configuration, if one was recorded.
    pub fn applied_fingerprint(&self) -> Option<&str> {
        self.annotations
            .get(FINGERPRINT_ANNOTATION)
            .map(String::as_str)
    }

    /// The currently stored rendered configuration, if any.
    pub fn rendered_conf(&self) -> Option<&str> {
        self.data.get(COLLECTD_CONF_KEY).map(String::as_str)
    }

    /// Record a newly rendered configuration and its fingerprint.
    pub fn apply_conf(&mut self, text: impl Into<String>, fingerprint: impl Into<String>) {
        self.data
            .insert(COLLECTD_CONF_KEY.to_string(), text.into());
        self.annotations
            .insert(FINGERPRINT_ANNOTATION.to_string(), fingerprint.into());
    }
}

/// A pod running the agent, identified for restart signaling after a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}
