//! Configuration types for the reconciliation core

use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry engine configuration
///
/// Hosts typically deserialize this from their own configuration layer and
/// convert it with [`RetryConfig::policy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total duration ceiling across all attempts of one operation (seconds)
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    /// Initial backoff wait; doubles after each retryable failure (seconds)
    #[serde(default = "default_seed_wait_secs")]
    pub seed_wait_secs: u64,
}

impl RetryConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.deadline_secs == 0 {
            return Err(crate::Error::config("retry deadline must be > 0"));
        }
        if self.seed_wait_secs == 0 {
            return Err(crate::Error::config("retry seed wait must be > 0"));
        }
        Ok(())
    }

    /// Convert into the policy the retry engine runs with
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            ceiling: Duration::from_secs(self.deadline_secs),
            seed_wait: Duration::from_secs(self.seed_wait_secs),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
            seed_wait_secs: default_seed_wait_secs(),
        }
    }
}

fn default_deadline_secs() -> u64 {
    60 * 60
}

fn default_seed_wait_secs() -> u64 {
    2
}
