//! Monitor reconciliation
//!
//! Monitors carry the heaviest codec traffic: three enum-coded fields on
//! the outbound path plus the composite alert-contact binding string. The
//! create response includes the full new id, so no follow-up read is
//! needed there; update performs the mandatory read-back to capture
//! server-computed fields such as status.

use super::ReadOutcome;
use crate::codec::{
    encode_contact_bindings, ContactBinding, HTTP_AUTH_TYPE, MONITOR_STATUS, MONITOR_SUB_TYPE,
    MONITOR_TYPE,
};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::traits::{EditMonitorRequest, MonitorApi, NewMonitorRequest, RemoteMonitor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Desired state for one monitor, as declared by the caller.
///
/// `status` is remote-computed and deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSpec {
    /// Display name
    pub friendly_name: String,
    /// URL or host to monitor
    pub url: String,
    /// Symbolic monitor type token ("http", "keyword", "ping", "port");
    /// immutable after creation
    pub monitor_type: String,
    /// Symbolic sub-type token, for port monitors
    #[serde(default)]
    pub sub_type: Option<String>,
    /// Port, for port monitors
    #[serde(default)]
    pub port: Option<u16>,
    /// Check interval (seconds)
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout: u32,
    /// HTTP basic/digest username
    #[serde(default)]
    pub http_username: Option<String>,
    /// HTTP basic/digest password
    #[serde(default)]
    pub http_password: Option<String>,
    /// Symbolic HTTP auth type token ("basic", "digest")
    #[serde(default)]
    pub http_auth_type: Option<String>,
    /// Skip TLS certificate verification on checks
    #[serde(default)]
    pub ignore_ssl_errors: bool,
    /// Alert contact bindings
    #[serde(default)]
    pub alert_contacts: Vec<ContactBinding>,
}

fn default_interval() -> u32 {
    300
}

fn default_timeout() -> u32 {
    30
}

/// Normalized remote state handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorState {
    /// Remote-assigned id
    pub id: u64,
    /// Display name
    pub friendly_name: String,
    /// Monitored URL or host
    pub url: String,
    /// Symbolic monitor type token; empty when the remote reported an
    /// unknown code
    pub monitor_type: String,
    /// Symbolic sub-type token, empty when unset or unknown
    pub sub_type: String,
    /// Port, when set
    pub port: Option<u16>,
    /// Check interval (seconds)
    pub interval: u32,
    /// Request timeout (seconds)
    pub timeout: u32,
    /// Symbolic status token (remote-computed)
    pub status: String,
    /// HTTP basic/digest username
    pub http_username: Option<String>,
    /// Symbolic HTTP auth type token, empty when unset or unknown
    pub http_auth_type: String,
    /// Alert contact bindings, structured
    pub alert_contacts: Vec<ContactBinding>,
}

/// Reconciler for monitors
pub struct MonitorReconciler {
    client: Arc<dyn MonitorApi>,
    policy: RetryPolicy,
}

impl MonitorReconciler {
    /// Create a reconciler over the given API client
    pub fn new(client: Arc<dyn MonitorApi>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Create the monitor remotely; returns the remote-assigned id to adopt
    /// as the record's identity
    pub async fn create(&self, spec: &MonitorSpec) -> Result<u64> {
        let request = NewMonitorRequest {
            friendly_name: spec.friendly_name.clone(),
            url: spec.url.clone(),
            monitor_type: MONITOR_TYPE.code(&spec.monitor_type).ok_or_else(|| {
                Error::invalid_input(format!("unknown monitor type: {}", spec.monitor_type))
            })?,
            sub_type: encode_optional(&MONITOR_SUB_TYPE, spec.sub_type.as_deref())?,
            port: spec.port,
            interval: spec.interval,
            timeout: spec.timeout,
            http_username: spec.http_username.clone(),
            http_password: spec.http_password.clone(),
            http_auth_type: encode_optional(&HTTP_AUTH_TYPE, spec.http_auth_type.as_deref())?,
            ignore_ssl_errors: spec.ignore_ssl_errors,
            alert_contacts: encode_contact_bindings(&spec.alert_contacts),
        };

        let client = &self.client;
        let request = &request;
        let id = self
            .policy
            .run(|| async move { client.new_monitor(request).await })
            .await?;
        info!(id, friendly_name = %spec.friendly_name, "created monitor");
        Ok(id)
    }

    /// Fetch the monitor by id; an empty result set means it was deleted
    /// out-of-band and reports as [`ReadOutcome::Absent`]
    pub async fn read(&self, id: u64) -> Result<ReadOutcome<MonitorState>> {
        let client = &self.client;
        let monitors = self
            .policy
            .run(|| async move { client.get_monitors(&[id]).await })
            .await?;

        match monitors.into_iter().next() {
            Some(monitor) => Ok(ReadOutcome::Present(normalize(monitor))),
            None => {
                debug!(id, "monitor absent on remote side");
                Ok(ReadOutcome::Absent)
            }
        }
    }

    /// Resend the full mutable field set, then read back the monitor to
    /// capture server-computed fields. The update is not complete until the
    /// read-back succeeds.
    pub async fn update(&self, id: u64, spec: &MonitorSpec) -> Result<MonitorState> {
        let request = EditMonitorRequest {
            friendly_name: spec.friendly_name.clone(),
            url: spec.url.clone(),
            sub_type: encode_optional(&MONITOR_SUB_TYPE, spec.sub_type.as_deref())?,
            port: spec.port,
            interval: spec.interval,
            timeout: spec.timeout,
            http_username: spec.http_username.clone(),
            http_password: spec.http_password.clone(),
            http_auth_type: encode_optional(&HTTP_AUTH_TYPE, spec.http_auth_type.as_deref())?,
            ignore_ssl_errors: spec.ignore_ssl_errors,
            alert_contacts: encode_contact_bindings(&spec.alert_contacts),
        };

        let client = &self.client;
        let request = &request;
        self.policy
            .run(|| async move { client.edit_monitor(id, request).await })
            .await?;

        match self.read(id).await? {
            ReadOutcome::Present(state) => Ok(state),
            ReadOutcome::Absent => Err(Error::not_found(format!(
                "monitor {} not found after update",
                spec.friendly_name
            ))),
        }
    }

    /// Delete the monitor by id. No read-back: subsequent reads naturally
    /// report absence.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let client = &self.client;
        self.policy
            .run(|| async move { client.delete_monitor(id).await })
            .await?;
        info!(id, "deleted monitor");
        Ok(())
    }
}

fn encode_optional(
    table: &crate::codec::EnumTable,
    token: Option<&str>,
) -> Result<Option<u16>> {
    match token {
        Some(token) => table
            .code(token)
            .map(Some)
            .ok_or_else(|| Error::invalid_input(format!("unknown {}: {token}", table.name()))),
        None => Ok(None),
    }
}

/// Numeric codes back to symbolic tokens; unknown codes degrade to empty
fn normalize(monitor: RemoteMonitor) -> MonitorState {
    MonitorState {
        id: monitor.id,
        friendly_name: monitor.friendly_name,
        url: monitor.url,
        monitor_type: MONITOR_TYPE.token(monitor.monitor_type).to_string(),
        sub_type: monitor
            .sub_type
            .map(|code| MONITOR_SUB_TYPE.token(code))
            .unwrap_or("")
            .to_string(),
        port: monitor.port,
        interval: monitor.interval,
        timeout: monitor.timeout,
        status: MONITOR_STATUS.token(monitor.status).to_string(),
        http_username: monitor.http_username,
        http_auth_type: monitor
            .http_auth_type
            .map(|code| HTTP_AUTH_TYPE.token(code))
            .unwrap_or("")
            .to_string(),
        alert_contacts: monitor.alert_contacts,
    }
}
