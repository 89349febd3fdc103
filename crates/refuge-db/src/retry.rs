//! Retry policy for lock contention and uniqueness races.
//!
//! Two failure shapes are retried, both narrowly matched:
//! - `database is locked` when starting an immediate transaction while another
//!   connection holds the write lock (backoff, then try again);
//! - `UNIQUE constraint failed` when a family insert races another writer
//!   (no sleep, look the family up again).
//!
//! Every other error propagates on the first occurrence.

use std::time::Duration;

use refuge_config::ResolverConfig;

/// Configuration for retry behavior on contention.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl From<&ResolverConfig> for RetryConfig {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl RetryConfig {
    /// Exponential backoff for the given (1-based) failed attempt, capped at
    /// `max_delay`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

/// Detect a unique-constraint violation (the family name index).
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Detect lock contention from another connection.
pub fn is_busy(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("database is locked") || msg.contains("database is busy")
}
