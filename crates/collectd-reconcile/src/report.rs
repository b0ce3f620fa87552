//! Reconcile outcome reporting

use serde::{Deserialize, Serialize};

/// What one reconciliation pass did to the shared configuration resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconcileOutcome {
    /// The rendered fingerprint matched the applied one; nothing written.
    Unchanged,
    /// The rendered text differed; configuration and fingerprint were pushed.
    Pushed,
}

/// Report from a reconciliation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Overall outcome of the pass
    pub outcome: ReconcileOutcome,
    /// Fingerprint of the configuration rendered by this pass
    pub fingerprint: String,
    /// Actions taken during the pass
    pub actions: Vec<String>,
}

impl ReconcileReport {
    /// Create a report for a pass that found nothing to push
    pub fn unchanged(fingerprint: String) -> Self {
        Self {
            outcome: ReconcileOutcome::Unchanged,
            fingerprint,
            actions: Vec::new(),
        }
    }

    /// Create a report for a pass that pushed a new configuration
    pub fn pushed(fingerprint: String) -> Self {
        Self {
            outcome: ReconcileOutcome::Pushed,
            fingerprint,
            actions: Vec::new(),
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }

    /// Whether this pass wrote to the configuration resource
    pub fn changed(&self) -> bool {
        self.outcome == ReconcileOutcome::Pushed
    }
}
