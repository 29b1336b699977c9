// # Monitor API Trait
//
// Defines the interface for monitor CRUD against the remote API.
//
// Outbound requests carry numeric codes and the composite encoded binding
// string; inbound monitors carry numeric codes and a *structured* binding
// list (the encoded form exists only on the write path).

use crate::codec::ContactBinding;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outbound request to create a monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMonitorRequest {
    /// Display name
    pub friendly_name: String,
    /// URL or host to monitor
    pub url: String,
    /// Numeric monitor type code (see `codec::MONITOR_TYPE`)
    pub monitor_type: u16,
    /// Numeric sub-type code, for port monitors
    pub sub_type: Option<u16>,
    /// Port, for port monitors
    pub port: Option<u16>,
    /// Check interval (seconds)
    pub interval: u32,
    /// Request timeout (seconds)
    pub timeout: u32,
    /// HTTP basic/digest username
    pub http_username: Option<String>,
    /// HTTP basic/digest password
    pub http_password: Option<String>,
    /// Numeric HTTP auth type code
    pub http_auth_type: Option<u16>,
    /// Skip TLS certificate verification on checks
    pub ignore_ssl_errors: bool,
    /// Encoded alert contact bindings (`id_threshold_recurrence` joined by
    /// `-`; empty string means no bindings)
    pub alert_contacts: String,
}

/// Outbound request to edit a monitor.
///
/// The API requires the full mutable field set to be resent, not a partial
/// patch; the monitor type is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditMonitorRequest {
    /// Display name
    pub friendly_name: String,
    /// URL or host to monitor
    pub url: String,
    /// Numeric sub-type code, for port monitors
    pub sub_type: Option<u16>,
    /// Port, for port monitors
    pub port: Option<u16>,
    /// Check interval (seconds)
    pub interval: u32,
    /// Request timeout (seconds)
    pub timeout: u32,
    /// HTTP basic/digest username
    pub http_username: Option<String>,
    /// HTTP basic/digest password
    pub http_password: Option<String>,
    /// Numeric HTTP auth type code
    pub http_auth_type: Option<u16>,
    /// Skip TLS certificate verification on checks
    pub ignore_ssl_errors: bool,
    /// Encoded alert contact bindings
    pub alert_contacts: String,
}

/// A monitor as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMonitor {
    /// Remote-assigned id
    pub id: u64,
    /// Display name
    pub friendly_name: String,
    /// Monitored URL or host
    pub url: String,
    /// Numeric monitor type code
    #[serde(rename = "type")]
    pub monitor_type: u16,
    /// Numeric sub-type code, when set
    #[serde(default)]
    pub sub_type: Option<u16>,
    /// Port, when set
    #[serde(default)]
    pub port: Option<u16>,
    /// Check interval (seconds)
    pub interval: u32,
    /// Request timeout (seconds)
    #[serde(default)]
    pub timeout: u32,
    /// Numeric status code (remote-computed)
    pub status: u16,
    /// HTTP basic/digest username
    #[serde(default)]
    pub http_username: Option<String>,
    /// HTTP basic/digest password
    #[serde(default)]
    pub http_password: Option<String>,
    /// Numeric HTTP auth type code, when set
    #[serde(default)]
    pub http_auth_type: Option<u16>,
    /// Alert contact bindings, returned structured on reads
    #[serde(default)]
    pub alert_contacts: Vec<ContactBinding>,
}

/// Trait for monitor API access
///
/// Implementations must not retry, cache, or spawn tasks; they execute one
/// call per method and propagate failures to the retry engine.
#[async_trait]
pub trait MonitorApi: Send + Sync {
    /// Create a monitor; returns the remote-assigned id
    async fn new_monitor(&self, request: &NewMonitorRequest) -> Result<u64>;

    /// Fetch monitors by id; an id absent on the remote side is simply
    /// missing from the result
    async fn get_monitors(&self, ids: &[u64]) -> Result<Vec<RemoteMonitor>>;

    /// Edit an existing monitor; returns its id
    async fn edit_monitor(&self, id: u64, request: &EditMonitorRequest) -> Result<u64>;

    /// Delete a monitor by id
    async fn delete_monitor(&self, id: u64) -> Result<()>;
}
