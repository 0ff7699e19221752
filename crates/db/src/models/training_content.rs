//! Master training content model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `training_contents` table: the master content of one
/// (site, language) pair. There is no cross-language fallback; a missing
/// row yields all-inapplicable simple steps for that language.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingContent {
    pub id: DbId,
    pub tenant_id: DbId,
    pub site_id: DbId,
    pub language: String,
    pub video_url: Option<String>,
    pub map_document_id: Option<DbId>,
    pub risks_text: Option<String>,
    pub document_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for authoring (upserting) the master content of a (site, language).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertTrainingContent {
    pub tenant_id: DbId,
    pub site_id: DbId,
    #[validate(length(min = 2, max = 11))]
    pub language: String,
    #[validate(url)]
    pub video_url: Option<String>,
    pub map_document_id: Option<DbId>,
    pub risks_text: Option<String>,
    #[serde(default)]
    pub document_ids: Vec<DbId>,
}
