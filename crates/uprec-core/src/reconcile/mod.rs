//! Reconciliation orchestration
//!
//! One reconciler per resource kind. Each entry point builds the remote
//! request by running desired-state fields through the codec, submits it
//! through the retry engine, and on success runs the response back through
//! the codec to produce normalized state for the host.
//!
//! Reconcilers never inspect status codes; classification is the retry
//! engine's job. They only decide when to call it and what to do with its
//! terminal outcome.

mod account;
mod alert_contact;
mod monitor;

pub use account::AccountReconciler;
pub use alert_contact::{AlertContactReconciler, AlertContactSpec, AlertContactState};
pub use monitor::{MonitorReconciler, MonitorSpec, MonitorState};

/// Outcome of reading a resource that may have been deleted out-of-band.
///
/// An empty result set from the remote API reports absence rather than
/// erroring, so the declarative host can plan a recreate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    /// The resource exists remotely; normalized state attached
    Present(T),
    /// The resource is gone on the remote side
    Absent,
}

impl<T> ReadOutcome<T> {
    /// Whether the resource was gone
    pub fn is_absent(&self) -> bool {
        matches!(self, ReadOutcome::Absent)
    }

    /// Convert into an `Option`, discarding the absent marker
    pub fn into_option(self) -> Option<T> {
        match self {
            ReadOutcome::Present(state) => Some(state),
            ReadOutcome::Absent => None,
        }
    }
}
