//! Resource model and store abstraction for Collectd Config Manager
//!
//! This crate is the seam between the reconciler and the cluster API. It
//! provides:
//!
//! - The resource model: plugin custom resources, the namespace-wide
//!   global-settings singleton, and the configuration resource carrying
//!   the rendered agent configuration
//! - [`ConfigStore`], the trait the reconciler reads and writes through,
//!   plus [`MemoryStore`], an in-memory implementation for tests and
//!   cluster-free embeddings
//! - Watch-label resolution and equality-selector matching

pub mod error;
pub mod labels;
pub mod model;
pub mod store;

pub use error::{Error, ResourceKind, Result};
pub use labels::{DEFAULT_WATCH_LABEL, LabelSelector, WATCH_LABELS_ENV, resolve_watch_label};
pub use model::{
    COLLECTD_CONF_KEY, COLLECTD_FINALIZER, ConfigResource, FINGERPRINT_ANNOTATION, GlobalSettings,
    PluginResource, PodSummary,
};
pub use store::{ConfigStore, MemoryStore};
