//! Watch-label resolution and equality-selector matching
//!
//! The operator scopes its watches with a label selector taken from the
//! environment. Selector syntax is the equality subset (`k=v`, comma
//! separated); set-based requirements are not supported.

use std::collections::BTreeMap;
use std::env;

/// Environment variable naming the labels the operator watches. Unset when
/// the operator runs cluster-scoped.
pub const WATCH_LABELS_ENV: &str = "WATCH_LABELS";

/// Label selector used when `WATCH_LABELS` is unset.
pub const DEFAULT_WATCH_LABEL: &str = "app=collectd";

/// Resolve the label selector the operator should watch.
///
/// When the environment variable is unset the condition is reported as a
/// warning and the default selector is used, so a misconfigured deployment
/// keeps reconciling instead of aborting.
pub fn resolve_watch_label() -> String {
    watch_label_or_default(env::var(WATCH_LABELS_ENV).ok())
}

fn watch_label_or_default(value: Option<String>) -> String {
    match value {
        Some(labels) => labels,
        None => {
            tracing::warn!(
                var = WATCH_LABELS_ENV,
                default = DEFAULT_WATCH_LABEL,
                "watch label variable unset, continuing with default"
            );
            DEFAULT_WATCH_LABEL.to_string()
        }
    }
}

/// Parsed equality-based label selector.
///
/// An empty selector matches every resource, mirroring cluster-scoped
/// listing semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<(String, String)>,
}

impl LabelSelector {
    /// Parse a `"key=value,key2=value2"` selector. Entries without `=` and
    /// blank entries are ignored.
    pub fn parse(selector: &str) -> Self {
        let requirements = selector
            .split(',')
            .filter_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.to_string()))
            })
            .collect();
        Self { requirements }
    }

    /// True when every requirement is present in `labels` with an equal value.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements
            .iter()
            .all(|(key, value)| labels.get(key).map(String::as_str) == Some(value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
