//! Validity/skip evaluation.
//!
//! Decides whether a visitor's training can be bypassed entirely because
//! the same person completed it recently enough. Evaluated once at flow
//! start, before the step catalog is consulted; a positive result moves the
//! visitor straight to `Skipped` with no step flags touched.

use chrono::Duration;

use crate::types::Timestamp;

/// A prior completed training of the same person (matched on
/// `identity_key` across repeat visits).
#[derive(Debug, Clone, Copy)]
pub struct PriorCompletion {
    pub completed_at: Timestamp,
    /// Version of the site training the completion was recorded under.
    pub training_version: Option<i32>,
}

/// The tenant's validity configuration.
#[derive(Debug, Clone, Copy)]
pub struct ValidityConfig {
    /// Days a completed training stays valid. Zero or negative disables
    /// skipping entirely.
    pub skip_threshold_days: i32,
    /// Current training version of the tenant. Bumping it invalidates
    /// prior completions.
    pub current_version: i32,
}

/// Whether training can be skipped for a visitor with the given prior
/// completion.
///
/// True iff a prior completion exists, it was recorded under the current
/// training version, and `now - completed_at` is strictly below the
/// configured threshold.
pub fn should_skip(
    prior: Option<&PriorCompletion>,
    config: &ValidityConfig,
    now: Timestamp,
) -> bool {
    if config.skip_threshold_days <= 0 {
        return false;
    }
    let Some(prior) = prior else {
        return false;
    };
    if prior.training_version != Some(config.current_version) {
        return false;
    }
    now - prior.completed_at < Duration::days(config.skip_threshold_days as i64)
}
