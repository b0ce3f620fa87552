//! Global-settings reconcile path

use collectd_conf::SynthesizedConf;

use crate::context::ReconcilerContext;
use crate::error::Result;
use crate::report::ReconcileReport;

impl ReconcilerContext {
    /// Reconcile after a change to the namespace's global-settings
    /// singleton: rebuild the full configuration and push it when the
    /// fingerprint moved.
    ///
    /// Holds the phase lock for the whole synthesize-and-push sequence.
    pub fn reconcile_global(&self, namespace: &str) -> Result<ReconcileReport> {
        let _phase = self.enter_phase();
        tracing::debug!(namespace, "global reconcile pass");

        let snapshot = self.snapshot(namespace)?;
        let conf = SynthesizedConf::build(snapshot.global_options(), &snapshot.fragments(), None);
        self.push_if_changed(namespace, conf)
    }
}
