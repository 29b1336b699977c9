//! Alert contact reconciliation
//!
//! Create is a retry-protected two-step operation: the create response is
//! partial, so a follow-up read-by-id populates the full record. If that
//! read finds zero rows the action fails with a not-found error naming the
//! contact, even though create nominally succeeded; the host must surface
//! this remote consistency gap, not silently ignore it.

use super::ReadOutcome;
use crate::codec::{CONTACT_STATUS, CONTACT_TYPE};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::traits::{
    AlertContactApi, EditAlertContactRequest, NewAlertContactRequest, RemoteAlertContact,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Desired state for one alert contact, as declared by the caller.
///
/// `status` is remote-computed and deliberately absent here: the schema
/// never accepts it as input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContactSpec {
    /// Display name
    pub friendly_name: String,
    /// Symbolic contact type token ("email", "slack", ...); immutable after
    /// creation
    pub contact_type: String,
    /// Contact value (address, webhook URL, phone number, ...); immutable
    /// after creation
    pub value: String,
}

/// Normalized remote state handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContactState {
    /// Remote-assigned id
    pub id: u64,
    /// Display name
    pub friendly_name: String,
    /// Symbolic contact type token; empty when the remote reported a code
    /// this build does not know
    pub contact_type: String,
    /// Symbolic status token (remote-computed)
    pub status: String,
    /// Contact value
    pub value: String,
}

/// Reconciler for alert contacts
pub struct AlertContactReconciler {
    client: Arc<dyn AlertContactApi>,
    policy: RetryPolicy,
}

impl AlertContactReconciler {
    /// Create a reconciler over the given API client
    pub fn new(client: Arc<dyn AlertContactApi>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Create the contact remotely and return its full normalized state.
    ///
    /// Two retry-protected calls: create, then the mandatory read-by-id.
    pub async fn create(&self, spec: &AlertContactSpec) -> Result<AlertContactState> {
        let contact_type = CONTACT_TYPE.code(&spec.contact_type).ok_or_else(|| {
            Error::invalid_input(format!("unknown contact type: {}", spec.contact_type))
        })?;

        let request = NewAlertContactRequest {
            contact_type,
            value: spec.value.clone(),
            friendly_name: spec.friendly_name.clone(),
        };

        let client = &self.client;
        let request = &request;
        let id = self
            .policy
            .run(|| async move { client.new_alert_contact(request).await })
            .await?;
        info!(id, friendly_name = %spec.friendly_name, "created alert contact");

        // The create response is partial; read back the full record.
        let contacts = self
            .policy
            .run(|| async move { client.get_alert_contacts(&[id]).await })
            .await?;

        let contact = contacts.into_iter().next().ok_or_else(|| {
            Error::not_found(format!(
                "alert contact {} not found after create",
                spec.friendly_name
            ))
        })?;

        Ok(normalize(contact))
    }

    /// Fetch the contact by id; an empty result set means it was deleted
    /// out-of-band and reports as [`ReadOutcome::Absent`]
    pub async fn read(&self, id: u64) -> Result<ReadOutcome<AlertContactState>> {
        let client = &self.client;
        let contacts = self
            .policy
            .run(|| async move { client.get_alert_contacts(&[id]).await })
            .await?;

        match contacts.into_iter().next() {
            Some(contact) => Ok(ReadOutcome::Present(normalize(contact))),
            None => {
                debug!(id, "alert contact absent on remote side");
                Ok(ReadOutcome::Absent)
            }
        }
    }

    /// Resend the full mutable field set, then read back the record to
    /// capture server-computed fields. The update is not complete until the
    /// read-back succeeds.
    pub async fn update(&self, id: u64, spec: &AlertContactSpec) -> Result<AlertContactState> {
        let request = EditAlertContactRequest {
            id,
            value: spec.value.clone(),
            friendly_name: spec.friendly_name.clone(),
        };

        let client = &self.client;
        let request = &request;
        self.policy
            .run(|| async move { client.edit_alert_contact(request).await })
            .await?;

        match self.read(id).await? {
            ReadOutcome::Present(state) => Ok(state),
            ReadOutcome::Absent => Err(Error::not_found(format!(
                "alert contact {} not found after update",
                spec.friendly_name
            ))),
        }
    }

    /// Delete the contact by id. No read-back: subsequent reads naturally
    /// report absence.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let client = &self.client;
        self.policy
            .run(|| async move { client.delete_alert_contact(id).await })
            .await?;
        info!(id, "deleted alert contact");
        Ok(())
    }
}

/// Numeric codes back to symbolic tokens; unknown codes degrade to empty
fn normalize(contact: RemoteAlertContact) -> AlertContactState {
    AlertContactState {
        id: contact.id,
        friendly_name: contact.friendly_name,
        contact_type: CONTACT_TYPE.token(contact.contact_type).to_string(),
        status: CONTACT_STATUS.token(contact.status).to_string(),
        value: contact.value,
    }
}
