//! Per-visit action instructions model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `action_infos` table. At most one per visit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionInfo {
    pub id: DbId,
    pub tenant_id: DbId,
    pub visit_id: DbId,
    pub instructions: String,
    pub document_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for authoring (upserting) the instructions of a visit.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertActionInfo {
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub document_ids: Vec<DbId>,
}
