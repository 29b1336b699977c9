//! Account reconciliation
//!
//! Accounts are read-only: the remote API exposes the authenticated
//! account's details but no mutations, so this reconciler only fetches.

use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::traits::{AccountApi, AccountDetails};
use std::sync::Arc;
use tracing::debug;

/// Read-only reconciler for the authenticated account
pub struct AccountReconciler {
    client: Arc<dyn AccountApi>,
    policy: RetryPolicy,
}

impl AccountReconciler {
    /// Create a reconciler over the given API client
    pub fn new(client: Arc<dyn AccountApi>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetch the account's details through the retry engine
    pub async fn read(&self) -> Result<AccountDetails> {
        let client = &self.client;
        let details = self
            .policy
            .run(|| async move { client.get_account_details().await })
            .await?;
        debug!(user_id = details.user_id, "fetched account details");
        Ok(details)
    }
}
