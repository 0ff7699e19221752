//! Per-tenant training configuration model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `training_configs` table. One per tenant; created with
/// defaults on first access.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingConfig {
    pub id: DbId,
    pub tenant_id: DbId,
    /// Days a completed training stays valid; zero disables skipping.
    pub skip_threshold_days: i32,
    pub require_quiz: bool,
    pub passing_score: Option<i32>,
    /// Bumping this invalidates prior completions for skip evaluation.
    pub training_version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating the tenant's training configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTrainingConfig {
    #[validate(range(min = 0, max = 3650))]
    pub skip_threshold_days: Option<i32>,
    pub require_quiz: Option<bool>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
}
