//! Reconciliation flows and locking for Collectd Config Manager
//!
//! This crate drives one reconciliation pass: read a complete snapshot of
//! the namespace's plugin and global-settings resources, synthesize the
//! canonical configuration text, fingerprint it, and push it to the shared
//! configuration resource only when the fingerprint moved.
//!
//! # Architecture
//!
//! ```text
//!        controller framework (external)
//!                     |
//!            collectd-reconcile
//!                     |
//!          +----------+----------+
//!          |                     |
//!    collectd-conf        collectd-store
//! ```
//!
//! Two entry points exist, one per trigger kind: [`ReconcilerContext::reconcile_global`]
//! for changes to the global-settings singleton and
//! [`ReconcilerContext::reconcile_plugin`] for changes to individual plugin
//! resources. The context serializes the two paths with a shared phase lock
//! so neither can push a configuration computed from stale plugin data over
//! a fresher one.

pub mod context;
pub mod error;
pub mod report;

mod global;
mod plugin;

pub use context::ReconcilerContext;
pub use error::{Error, Result};
pub use report::{ReconcileOutcome, ReconcileReport};
