// # Alert Contact API Trait
//
// Defines the interface for alert contact CRUD against the remote API.
//
// Request types carry the API's wire shape: numeric codes, not symbolic
// tokens. The codec translates at the reconciler boundary.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outbound request to create an alert contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAlertContactRequest {
    /// Numeric contact type code (see `codec::CONTACT_TYPE`)
    pub contact_type: u16,
    /// Contact value (address, webhook URL, phone number, ...)
    pub value: String,
    /// Display name
    pub friendly_name: String,
}

/// Outbound request to edit an alert contact.
///
/// The API requires the full mutable field set to be resent; type is
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditAlertContactRequest {
    /// Remote-assigned id of the contact to edit
    pub id: u64,
    /// New contact value
    pub value: String,
    /// New display name
    pub friendly_name: String,
}

/// An alert contact as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAlertContact {
    /// Remote-assigned id
    pub id: u64,
    /// Display name
    pub friendly_name: String,
    /// Numeric contact type code
    #[serde(rename = "type")]
    pub contact_type: u16,
    /// Numeric status code (remote-computed)
    pub status: u16,
    /// Contact value
    pub value: String,
}

/// Trait for alert contact API access
///
/// Implementations must not retry, cache, or spawn tasks; they execute one
/// call per method and propagate failures to the retry engine.
#[async_trait]
pub trait AlertContactApi: Send + Sync {
    /// Create an alert contact; returns the remote-assigned id.
    ///
    /// The create response is partial; callers needing the full record must
    /// follow up with [`AlertContactApi::get_alert_contacts`].
    async fn new_alert_contact(&self, request: &NewAlertContactRequest) -> Result<u64>;

    /// Fetch alert contacts by id; an id absent on the remote side is
    /// simply missing from the result
    async fn get_alert_contacts(&self, ids: &[u64]) -> Result<Vec<RemoteAlertContact>>;

    /// Edit an existing alert contact
    async fn edit_alert_contact(&self, request: &EditAlertContactRequest) -> Result<()>;

    /// Delete an alert contact by id
    async fn delete_alert_contact(&self, id: u64) -> Result<()>;
}
