//! Document reference model and DTOs.
//!
//! Only references are stored; bytes live in external storage and are
//! resolved to URLs by the API layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub tenant_id: DbId,
    pub file_name: String,
    pub storage_key: String,
    pub content_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a stored document reference.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDocument {
    pub tenant_id: DbId,
    #[validate(length(min = 1, max = 500))]
    pub file_name: String,
    #[validate(length(min = 1, max = 1000))]
    pub storage_key: String,
    pub content_type: Option<String>,
}
