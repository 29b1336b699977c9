// # UptimeRobot API Client
//
// This crate implements the `uprec-core` API traits against the UptimeRobot
// v2 HTTP API.
//
// ## Wire protocol
//
// Every method is a form-encoded POST to `https://api.uptimerobot.com/v2/<method>`
// carrying `api_key` and `format=json`. Responses are a JSON envelope with
// `"stat": "ok"` or `"stat": "fail"`; failures inside a 200 response arrive
// with the envelope's error object flattened into the message text so the
// retry engine's free-text classification rules can see it.
//
// ## Architectural constraints
//
// - One HTTP request per trait method call
// - Full error propagation to the reconcilers (retry, backoff, and
//   classification are owned by `uprec-core`)
// - HTTP timeout configured (30 seconds)
// - No caching, no background tasks
//
// ## Security
//
// The API key never appears in logs; the Debug implementation redacts it.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use uprec_core::codec::ContactBinding;
use uprec_core::traits::{
    AccountApi, AccountDetails, AlertContactApi, EditAlertContactRequest, EditMonitorRequest,
    MonitorApi, NewAlertContactRequest, NewMonitorRequest, RemoteAlertContact, RemoteMonitor,
};
use uprec_core::{Error, Result};

/// UptimeRobot API base URL
const API_BASE: &str = "https://api.uptimerobot.com/v2";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// UptimeRobot v2 API client
pub struct UptimeRobotClient {
    /// API key; never log this value
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for UptimeRobotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UptimeRobotClient")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UptimeRobotClient {
    /// Create a new client for the production API endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE)
    }

    /// Create a client against a custom endpoint (tests, proxies)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("UptimeRobot API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: base_url.into(),
            client,
        })
    }

    /// POST one API method and return the decoded `stat: ok` envelope
    async fn call(&self, method: &str, params: Vec<(&'static str, String)>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, method);
        debug!(method, params = params.len(), "calling UptimeRobot API");

        let mut form = vec![
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
        ];
        form.extend(params);

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            return Err(Error::api(
                Some(status.as_u16()),
                format!("{method} failed: {body}"),
            ));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| Error::http(format!("failed to parse response: {e}")))?;

        if envelope["stat"] == "fail" {
            // Flatten the error object verbatim so free-text markers (the
            // known 400-quirk, "Service unavailable. Please try again", ...)
            // survive into the message for classification.
            let error_text = envelope
                .get("error")
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown API failure".to_string());
            return Err(Error::api(None, format!("{method} failed: {error_text}")));
        }

        Ok(envelope)
    }
}

#[async_trait]
impl AccountApi for UptimeRobotClient {
    async fn get_account_details(&self) -> Result<AccountDetails> {
        let envelope = self.call("getAccountDetails", Vec::new()).await?;
        let account = &envelope["account"];

        Ok(AccountDetails {
            user_id: opt_u64_field(account, "user_id")?.unwrap_or(0),
            email: str_field(account, "email")?,
            monitor_limit: u64_field(account, "monitor_limit")? as u32,
            monitor_interval: u64_field(account, "monitor_interval")? as u32,
            up_monitors: u64_field(account, "up_monitors")? as u32,
            down_monitors: u64_field(account, "down_monitors")? as u32,
            paused_monitors: u64_field(account, "paused_monitors")? as u32,
        })
    }
}

#[async_trait]
impl AlertContactApi for UptimeRobotClient {
    async fn new_alert_contact(&self, request: &NewAlertContactRequest) -> Result<u64> {
        let params = vec![
            ("type", request.contact_type.to_string()),
            ("value", request.value.clone()),
            ("friendly_name", request.friendly_name.clone()),
        ];
        let envelope = self.call("newAlertContact", params).await?;
        u64_field(&envelope["alertcontact"], "id")
    }

    async fn get_alert_contacts(&self, ids: &[u64]) -> Result<Vec<RemoteAlertContact>> {
        let params = vec![("alert_contacts", join_ids(ids))];
        let envelope = self.call("getAlertContacts", params).await?;

        let rows = envelope["alert_contacts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        rows.iter().map(parse_alert_contact).collect()
    }

    async fn edit_alert_contact(&self, request: &EditAlertContactRequest) -> Result<()> {
        let params = vec![
            ("id", request.id.to_string()),
            ("value", request.value.clone()),
            ("friendly_name", request.friendly_name.clone()),
        ];
        self.call("editAlertContact", params).await?;
        Ok(())
    }

    async fn delete_alert_contact(&self, id: u64) -> Result<()> {
        self.call("deleteAlertContact", vec![("id", id.to_string())])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MonitorApi for UptimeRobotClient {
    async fn new_monitor(&self, request: &NewMonitorRequest) -> Result<u64> {
        let mut params = vec![
            ("friendly_name", request.friendly_name.clone()),
            ("url", request.url.clone()),
            ("type", request.monitor_type.to_string()),
            ("interval", request.interval.to_string()),
            ("timeout", request.timeout.to_string()),
            ("ignore_ssl_errors", bool_param(request.ignore_ssl_errors)),
            ("alert_contacts", request.alert_contacts.clone()),
        ];
        push_opt(&mut params, "sub_type", request.sub_type.map(|v| v.to_string()));
        push_opt(&mut params, "port", request.port.map(|v| v.to_string()));
        push_opt(&mut params, "http_username", request.http_username.clone());
        push_opt(&mut params, "http_password", request.http_password.clone());
        push_opt(
            &mut params,
            "http_auth_type",
            request.http_auth_type.map(|v| v.to_string()),
        );

        let envelope = self.call("newMonitor", params).await?;
        u64_field(&envelope["monitor"], "id")
    }

    async fn get_monitors(&self, ids: &[u64]) -> Result<Vec<RemoteMonitor>> {
        let params = vec![
            ("monitors", join_ids(ids)),
            // include the structured alert contact bindings in the response
            ("alert_contacts", "1".to_string()),
        ];
        let envelope = self.call("getMonitors", params).await?;

        let rows = envelope["monitors"].as_array().cloned().unwrap_or_default();
        rows.iter().map(parse_monitor).collect()
    }

    async fn edit_monitor(&self, id: u64, request: &EditMonitorRequest) -> Result<u64> {
        let mut params = vec![
            ("id", id.to_string()),
            ("friendly_name", request.friendly_name.clone()),
            ("url", request.url.clone()),
            ("interval", request.interval.to_string()),
            ("timeout", request.timeout.to_string()),
            ("ignore_ssl_errors", bool_param(request.ignore_ssl_errors)),
            ("alert_contacts", request.alert_contacts.clone()),
        ];
        push_opt(&mut params, "sub_type", request.sub_type.map(|v| v.to_string()));
        push_opt(&mut params, "port", request.port.map(|v| v.to_string()));
        push_opt(&mut params, "http_username", request.http_username.clone());
        push_opt(&mut params, "http_password", request.http_password.clone());
        push_opt(
            &mut params,
            "http_auth_type",
            request.http_auth_type.map(|v| v.to_string()),
        );

        let envelope = self.call("editMonitor", params).await?;
        u64_field(&envelope["monitor"], "id")
    }

    async fn delete_monitor(&self, id: u64) -> Result<()> {
        self.call("deleteMonitor", vec![("id", id.to_string())])
            .await?;
        Ok(())
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

fn bool_param(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        params.push((key, value));
    }
}

// The API is loose about numeric types: ids and codes arrive sometimes as
// JSON numbers, sometimes as strings. These helpers accept both.

fn u64_field(value: &Value, field: &str) -> Result<u64> {
    opt_u64_field(value, field)?
        .ok_or_else(|| Error::http(format!("missing numeric field: {field}")))
}

fn opt_u64_field(value: &Value, field: &str) -> Result<Option<u64>> {
    match &value[field] {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_u64()),
        Value::String(s) => s
            .parse()
            .map(Some)
            .map_err(|_| Error::http(format!("non-numeric field {field}: {s}"))),
        other => Err(Error::http(format!("unexpected field {field}: {other}"))),
    }
}

fn str_field(value: &Value, field: &str) -> Result<String> {
    value[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::http(format!("missing string field: {field}")))
}

fn opt_str_field(value: &Value, field: &str) -> Option<String> {
    value[field]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_alert_contact(row: &Value) -> Result<RemoteAlertContact> {
    Ok(RemoteAlertContact {
        id: u64_field(row, "id")?,
        friendly_name: str_field(row, "friendly_name")?,
        contact_type: u64_field(row, "type")? as u16,
        status: u64_field(row, "status")? as u16,
        value: str_field(row, "value")?,
    })
}

fn parse_monitor(row: &Value) -> Result<RemoteMonitor> {
    let bindings = row["alert_contacts"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|b| {
                    Ok(ContactBinding {
                        id: u64_field(b, "id")?.to_string(),
                        threshold: opt_u64_field(b, "threshold")?.unwrap_or(0) as u32,
                        recurrence: opt_u64_field(b, "recurrence")?.unwrap_or(0) as u32,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(RemoteMonitor {
        id: u64_field(row, "id")?,
        friendly_name: str_field(row, "friendly_name")?,
        url: str_field(row, "url")?,
        monitor_type: u64_field(row, "type")? as u16,
        sub_type: opt_u64_field(row, "sub_type")?.map(|v| v as u16),
        port: opt_u64_field(row, "port")?.map(|v| v as u16),
        interval: u64_field(row, "interval")? as u32,
        timeout: opt_u64_field(row, "timeout")?.unwrap_or(0) as u32,
        status: u64_field(row, "status")? as u16,
        http_username: opt_str_field(row, "http_username"),
        http_password: opt_str_field(row, "http_password"),
        http_auth_type: opt_u64_field(row, "http_auth_type")?.map(|v| v as u16),
        alert_contacts: bindings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(UptimeRobotClient::new("").is_err());
    }

    #[test]
    fn api_key_not_exposed_in_debug() {
        let client = UptimeRobotClient::new("u123456-secret").unwrap();
        let debug_str = format!("{client:?}");
        assert!(!debug_str.contains("secret"));
        assert!(debug_str.contains("UptimeRobotClient"));
    }

    #[test]
    fn numeric_fields_accept_strings_and_numbers() {
        let row = json!({"id": "457", "count": 3});
        assert_eq!(u64_field(&row, "id").unwrap(), 457);
        assert_eq!(u64_field(&row, "count").unwrap(), 3);
        assert!(u64_field(&row, "missing").is_err());
        assert_eq!(opt_u64_field(&row, "missing").unwrap(), None);
    }

    #[test]
    fn monitor_rows_parse_with_structured_bindings() {
        let row = json!({
            "id": 777,
            "friendly_name": "api",
            "url": "https://example.com",
            "type": 1,
            "interval": 300,
            "status": 2,
            "alert_contacts": [
                {"id": "457", "threshold": 5, "recurrence": 10},
                {"id": 982, "threshold": 0, "recurrence": 0}
            ]
        });

        let monitor = parse_monitor(&row).unwrap();
        assert_eq!(monitor.id, 777);
        assert_eq!(monitor.alert_contacts.len(), 2);
        assert_eq!(monitor.alert_contacts[0].id, "457");
        assert_eq!(monitor.alert_contacts[0].threshold, 5);
        assert_eq!(monitor.alert_contacts[1].id, "982");
    }

    #[test]
    fn contact_rows_parse_with_string_ids() {
        let row = json!({
            "id": "123",
            "friendly_name": "oncall",
            "type": 11,
            "status": "2",
            "value": "#alerts"
        });

        let contact = parse_alert_contact(&row).unwrap();
        assert_eq!(contact.id, 123);
        assert_eq!(contact.contact_type, 11);
        assert_eq!(contact.status, 2);
    }

    #[test]
    fn ids_join_with_hyphen() {
        assert_eq!(join_ids(&[1, 22, 333]), "1-22-333");
        assert_eq!(join_ids(&[]), "");
    }
}
