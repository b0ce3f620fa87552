//! Deterministic synthesis of the collectd agent configuration
//!
//! Merges the namespace-wide global settings block with an unordered
//! collection of plugin fragments into a single canonical `collectd.conf`
//! text. The output is byte-stable for a given logical state so its
//! fingerprint can drive change detection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fingerprint::fingerprint;

/// Reserved fragment name under which a plugin resource carries global
/// options instead of a loadable plugin configuration.
pub const GLOBAL_FRAGMENT_NAME: &str = "global";

/// Fixed trailer appended to every rendered configuration. collectd rejects
/// a file without a final newline, so the trailer doubles as documentation
/// inside the generated text.
pub const CONF_TRAILER: &str = "#Last line (collectd requires '\\n' at the last line)\n";

/// One plugin resource's contribution to the rendered configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Plugin name, unique per namespace by convention. When two fragments
    /// share a name the one observed later overwrites the earlier one; the
    /// store does not guarantee enumeration order, so which fragment
    /// survives a true collision is unspecified.
    pub name: String,
    /// Opaque configuration text block.
    pub body: String,
}

impl Fragment {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Rendered configuration text together with its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedConf {
    pub text: String,
    pub fingerprint: String,
}

impl SynthesizedConf {
    /// Synthesize and fingerprint in one step.
    pub fn build(
        global_settings: Option<&str>,
        fragments: &[Fragment],
        exclude_name: Option<&str>,
    ) -> Self {
        let text = synthesize(global_settings, fragments, exclude_name);
        let fingerprint = fingerprint(text.as_bytes());
        Self { text, fingerprint }
    }
}

/// Render the canonical configuration text.
///
/// `global_settings` is authoritative when present, even when empty: an
/// explicit global-settings object suppresses every fragment named
/// `"global"`. When absent, each `"global"` fragment contributes its body
/// to the effective global block in encountered order.
///
/// All other fragments are emitted as `LoadPlugin <name>` sections in
/// lexicographic name order. The sort is a contract, not a convenience:
/// the caller fingerprints the output to decide whether a reconfiguration
/// push is needed, and order drift would register as spurious change.
///
/// `exclude_name` marks a deletion pass: the named plugin is omitted from
/// the rebuilt text even if still visible in `fragments`, and the global
/// block is omitted as well.
pub fn synthesize(
    global_settings: Option<&str>,
    fragments: &[Fragment],
    exclude_name: Option<&str>,
) -> String {
    let mut global_block = String::new();
    if let Some(options) = global_settings {
        global_block.push_str(options);
        global_block.push('\n');
    }

    let mut plugins: HashMap<&str, &str> = HashMap::new();
    for fragment in fragments {
        if fragment.name == GLOBAL_FRAGMENT_NAME {
            if global_settings.is_none() {
                global_block.push_str(&fragment.body);
                global_block.push('\n');
            }
        } else {
            plugins.insert(&fragment.name, &fragment.body);
        }
    }

    let mut text = String::new();
    match exclude_name {
        Some(name) => {
            plugins.remove(name);
        }
        None => text.push_str(&global_block),
    }

    let mut names: Vec<&str> = plugins.keys().copied().collect();
    names.sort_unstable();

    for name in names {
        text.push_str("LoadPlugin ");
        text.push_str(name);
        text.push('\n');
        text.push_str(plugins[name]);
        text.push('\n');
    }

    text.push_str(CONF_TRAILER);
    text
}
