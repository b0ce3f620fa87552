//! Error types for collectd-store

use std::fmt;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of resources the store serves, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Plugin,
    GlobalSettings,
    ConfigResource,
    Pod,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Plugin => "plugin",
            ResourceKind::GlobalSettings => "global settings",
            ResourceKind::ConfigResource => "configuration resource",
            ResourceKind::Pod => "pod",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when reading or writing cluster-side resources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested resource does not exist in the namespace. Surfaced
    /// unmodified to the caller, which retries the whole reconciliation.
    #[error("no {kind} found in namespace {namespace}")]
    NotFound {
        kind: ResourceKind,
        namespace: String,
    },

    /// The backing store is unreachable or failed transiently.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl Error {
    pub fn not_found(kind: ResourceKind, namespace: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            namespace: namespace.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
