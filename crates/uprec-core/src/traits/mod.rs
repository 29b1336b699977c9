//! Remote API traits
//!
//! The narrow seam between the reconciliation core and the UptimeRobot
//! client. One trait per resource kind. Implementations make exactly one
//! HTTP call per method and return errors verbatim; retry, backoff and
//! classification are owned by the retry engine.

mod account;
mod alert_contact;
mod monitor;

pub use account::{AccountApi, AccountDetails};
pub use alert_contact::{
    AlertContactApi, EditAlertContactRequest, NewAlertContactRequest, RemoteAlertContact,
};
pub use monitor::{EditMonitorRequest, MonitorApi, NewMonitorRequest, RemoteMonitor};
