//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub tenant_id: DbId,
    pub site_id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a department.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartment {
    pub tenant_id: DbId,
    pub site_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}
