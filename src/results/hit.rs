use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status code recorded when a response body fails its MD5 check.
pub const INTEGRITY_FAILURE_CODE: u16 = 250;

/// Outcome of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    /// Wall clock instant the request was issued. `None` when it could not be built.
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(with = "super::nanos")]
    pub latency: Duration,
    pub bytes_out: u64,
    pub bytes_in: u64,
    pub code: u16,
    #[serde(default)]
    pub error: String,
}

impl HitResult {
    /// Result for a request that never left the process.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code) && self.error.is_empty()
    }

    /// Codes the run log flags as suspicious.
    #[must_use]
    pub const fn is_alarming(&self) -> bool {
        self.code >= INTEGRITY_FAILURE_CODE || self.code < 200
    }
}
