// # uprec-core
//
// Core library for reconciling declared monitoring resources (accounts,
// alert contacts, monitors) against the UptimeRobot remote API.
//
// ## Architecture Overview
//
// - **Retry engine** (`retry`): bounded-duration retry with exponential
//   backoff and per-attempt jitter, plus the classification policy deciding
//   which remote failures are worth retrying.
// - **Codec** (`codec`): static bidirectional enum tables mapping symbolic
//   configuration tokens to the API's numeric codes, and the composite
//   alert-contact binding encoding.
// - **API traits** (`traits`): the narrow seam to the remote client. One
//   trait per resource kind; implementations make exactly one HTTP call per
//   method and never retry (retry is owned by this crate).
// - **Reconcilers** (`reconcile`): per-resource-kind create/read/update/
//   delete orchestration tying the codec and the retry engine together.
//
// ## Design Principles
//
// 1. **Engine-owned retry**: API client implementations return errors;
//    only the retry engine decides whether to try again.
// 2. **Typed desired state**: the host adapter hands the core fully typed
//    records, never untyped field bags.
// 3. **Degrade, don't crash**: unknown numeric codes from the remote map to
//    empty symbolic fields; a vanished resource reads as `Absent`.

pub mod codec;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod retry;
pub mod traits;

// Re-export core types for convenience
pub use config::RetryConfig;
pub use error::{Error, Result};
pub use reconcile::{
    AccountReconciler, AlertContactReconciler, MonitorReconciler, ReadOutcome,
};
pub use retry::RetryPolicy;
