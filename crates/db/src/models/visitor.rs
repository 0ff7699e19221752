//! Visitor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::training::StepFlags;
use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `visitors` table.
///
/// Step flags are only ever set, never cleared; a fresh visit row means
/// fresh training state. `identity_key` matches the same person across
/// repeat visits for validity/skip evaluation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visitor {
    pub id: DbId,
    pub tenant_id: DbId,
    pub visit_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub identity_key: Option<String>,
    pub participation_status: String,
    pub presence_status: String,
    pub video_done: bool,
    pub map_done: bool,
    pub risks_done: bool,
    pub department_done: bool,
    pub equipment_done: bool,
    pub action_info_done: bool,
    pub training_status: String,
    pub training_skipped: bool,
    pub training_version: Option<i32>,
    pub training_started_at: Option<Timestamp>,
    pub training_completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Visitor {
    /// The per-step completion flags as the core value type.
    pub fn step_flags(&self) -> StepFlags {
        StepFlags {
            video: self.video_done,
            map: self.map_done,
            risks: self.risks_done,
            department: self.department_done,
            equipment: self.equipment_done,
            action_info: self.action_info_done,
        }
    }
}

/// DTO for adding a visitor to a visit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVisitor {
    #[validate(length(min = 1, max = 200))]
    pub first_name: String,
    #[validate(length(min = 1, max = 200))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 300))]
    pub company: Option<String>,
}
