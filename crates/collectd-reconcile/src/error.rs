//! Error types for collectd-reconcile

/// Result type for reconcile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a reconciliation pass
///
/// Synthesis itself never fails; every failure originates in the store and
/// is surfaced unmodified so the controller framework can retry the whole
/// pass later. A failed pass leaves the previously applied configuration
/// and fingerprint untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Store error from collectd-store
    #[error(transparent)]
    Store(#[from] collectd_store::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(e) => e.is_not_found(),
        }
    }
}
