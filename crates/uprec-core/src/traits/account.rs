// # Account API Trait
//
// Read-only access to the authenticated account's details.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Account details as reported by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Remote-assigned account id
    #[serde(default)]
    pub user_id: u64,
    /// Account email address
    pub email: String,
    /// Maximum number of monitors the plan allows
    pub monitor_limit: u32,
    /// Minimum check interval the plan allows (seconds)
    pub monitor_interval: u32,
    /// Monitors currently up
    pub up_monitors: u32,
    /// Monitors currently down
    pub down_monitors: u32,
    /// Monitors currently paused
    pub paused_monitors: u32,
}

/// Trait for account-level API access
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Fetch the authenticated account's details
    async fn get_account_details(&self) -> Result<AccountDetails>;
}
