//! Configuration synthesis core for Collectd Config Manager
//!
//! This crate is the pure, I/O-free heart of the operator:
//!
//! - **Synthesis**: merge a namespace's global settings with an unordered
//!   collection of plugin fragments into one canonical `collectd.conf` text
//! - **Fingerprinting**: digest the rendered text so the reconciler can
//!   detect whether a configuration push is needed
//! - **String-list helpers**: membership and removal over ordered lists,
//!   used for finalizer bookkeeping
//!
//! Determinism is the load-bearing property: two synthesis calls over the
//! same logical state produce byte-identical text and therefore identical
//! fingerprints, which is what lets the reconciler treat "fingerprint
//! unchanged" as "no-op needed".

pub mod fingerprint;
pub mod strlist;
pub mod synth;

pub use fingerprint::fingerprint;
pub use synth::{
    CONF_TRAILER, Fragment, GLOBAL_FRAGMENT_NAME, SynthesizedConf, synthesize,
};
