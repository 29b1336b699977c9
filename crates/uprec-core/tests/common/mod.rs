//! Test doubles and common utilities for contract tests
//!
//! Scripted API clients: each call pops the next scripted result and counts
//! the invocation, so tests can assert exactly how many remote calls the
//! retry engine and reconcilers made.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uprec_core::error::{Error, Result};
use uprec_core::retry::RetryPolicy;
use uprec_core::traits::{
    AccountApi, AccountDetails, AlertContactApi, EditAlertContactRequest, EditMonitorRequest,
    MonitorApi, NewAlertContactRequest, NewMonitorRequest, RemoteAlertContact, RemoteMonitor,
};

/// A short retry policy so deadline tests complete in a few paused-clock
/// seconds instead of the production hour
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        ceiling: std::time::Duration::from_secs(30),
        ..RetryPolicy::default()
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T>>>, counter: &AtomicUsize, method: &str) -> Result<T> {
    counter.fetch_add(1, Ordering::SeqCst);
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(Error::Other(format!("script exhausted for {method}"))))
}

/// Scripted alert contact API double
#[derive(Default)]
pub struct ScriptedContactApi {
    pub new_results: Mutex<VecDeque<Result<u64>>>,
    pub get_results: Mutex<VecDeque<Result<Vec<RemoteAlertContact>>>>,
    pub edit_results: Mutex<VecDeque<Result<()>>>,
    pub delete_results: Mutex<VecDeque<Result<()>>>,
    pub new_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl ScriptedContactApi {
    pub fn script_new(&self, result: Result<u64>) {
        self.new_results.lock().unwrap().push_back(result);
    }

    pub fn script_get(&self, result: Result<Vec<RemoteAlertContact>>) {
        self.get_results.lock().unwrap().push_back(result);
    }

    pub fn script_edit(&self, result: Result<()>) {
        self.edit_results.lock().unwrap().push_back(result);
    }

    pub fn script_delete(&self, result: Result<()>) {
        self.delete_results.lock().unwrap().push_back(result);
    }
}

#[async_trait::async_trait]
impl AlertContactApi for ScriptedContactApi {
    async fn new_alert_contact(&self, _request: &NewAlertContactRequest) -> Result<u64> {
        pop(&self.new_results, &self.new_calls, "newAlertContact")
    }

    async fn get_alert_contacts(&self, _ids: &[u64]) -> Result<Vec<RemoteAlertContact>> {
        pop(&self.get_results, &self.get_calls, "getAlertContacts")
    }

    async fn edit_alert_contact(&self, _request: &EditAlertContactRequest) -> Result<()> {
        pop(&self.edit_results, &self.edit_calls, "editAlertContact")
    }

    async fn delete_alert_contact(&self, _id: u64) -> Result<()> {
        pop(&self.delete_results, &self.delete_calls, "deleteAlertContact")
    }
}

/// Scripted monitor API double
#[derive(Default)]
pub struct ScriptedMonitorApi {
    pub new_results: Mutex<VecDeque<Result<u64>>>,
    pub get_results: Mutex<VecDeque<Result<Vec<RemoteMonitor>>>>,
    pub edit_results: Mutex<VecDeque<Result<u64>>>,
    pub delete_results: Mutex<VecDeque<Result<()>>>,
    pub new_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// Last encoded alert_contacts string seen on a create
    pub last_new_bindings: Mutex<Option<String>>,
}

impl ScriptedMonitorApi {
    pub fn script_new(&self, result: Result<u64>) {
        self.new_results.lock().unwrap().push_back(result);
    }

    pub fn script_get(&self, result: Result<Vec<RemoteMonitor>>) {
        self.get_results.lock().unwrap().push_back(result);
    }

    pub fn script_edit(&self, result: Result<u64>) {
        self.edit_results.lock().unwrap().push_back(result);
    }

    pub fn script_delete(&self, result: Result<()>) {
        self.delete_results.lock().unwrap().push_back(result);
    }
}

#[async_trait::async_trait]
impl MonitorApi for ScriptedMonitorApi {
    async fn new_monitor(&self, request: &NewMonitorRequest) -> Result<u64> {
        *self.last_new_bindings.lock().unwrap() = Some(request.alert_contacts.clone());
        pop(&self.new_results, &self.new_calls, "newMonitor")
    }

    async fn get_monitors(&self, _ids: &[u64]) -> Result<Vec<RemoteMonitor>> {
        pop(&self.get_results, &self.get_calls, "getMonitors")
    }

    async fn edit_monitor(&self, _id: u64, _request: &EditMonitorRequest) -> Result<u64> {
        pop(&self.edit_results, &self.edit_calls, "editMonitor")
    }

    async fn delete_monitor(&self, _id: u64) -> Result<()> {
        pop(&self.delete_results, &self.delete_calls, "deleteMonitor")
    }
}

/// Scripted account API double
#[derive(Default)]
pub struct ScriptedAccountApi {
    pub get_results: Mutex<VecDeque<Result<AccountDetails>>>,
    pub get_calls: AtomicUsize,
}

impl ScriptedAccountApi {
    pub fn script_get(&self, result: Result<AccountDetails>) {
        self.get_results.lock().unwrap().push_back(result);
    }
}

#[async_trait::async_trait]
impl AccountApi for ScriptedAccountApi {
    async fn get_account_details(&self) -> Result<AccountDetails> {
        pop(&self.get_results, &self.get_calls, "getAccountDetails")
    }
}

/// Account details with sensible defaults
pub fn account_details() -> AccountDetails {
    AccountDetails {
        user_id: 100,
        email: "ops@example.com".to_string(),
        monitor_limit: 50,
        monitor_interval: 60,
        up_monitors: 3,
        down_monitors: 1,
        paused_monitors: 0,
    }
}

/// A remote alert contact row with sensible defaults
pub fn remote_contact(id: u64, friendly_name: &str, contact_type: u16) -> RemoteAlertContact {
    RemoteAlertContact {
        id,
        friendly_name: friendly_name.to_string(),
        contact_type,
        status: 2,
        value: "ops@example.com".to_string(),
    }
}

/// A remote monitor row with sensible defaults
pub fn remote_monitor(id: u64, friendly_name: &str) -> RemoteMonitor {
    RemoteMonitor {
        id,
        friendly_name: friendly_name.to_string(),
        url: "https://example.com".to_string(),
        monitor_type: 1,
        sub_type: None,
        port: None,
        interval: 300,
        timeout: 30,
        status: 2,
        http_username: None,
        http_password: None,
        http_auth_type: None,
        alert_contacts: Vec::new(),
    }
}
