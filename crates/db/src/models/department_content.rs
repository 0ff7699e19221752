//! Department-specific content model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `department_contents` table. A row with empty text and
/// zero documents counts as "nothing to show" and is excluded from
/// resolved bundles.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentContent {
    pub id: DbId,
    pub tenant_id: DbId,
    pub training_content_id: DbId,
    pub department_id: DbId,
    pub body_text: String,
    pub document_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for authoring (upserting) one department's briefing.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertDepartmentContent {
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub document_ids: Vec<DbId>,
}
