//! Protective-equipment requirement model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `equipment_requirements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentRequirement {
    pub id: DbId,
    pub tenant_id: DbId,
    pub site_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One item of a full equipment-list replacement for a site.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EquipmentItemInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO replacing the active equipment list of a site.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceEquipment {
    pub tenant_id: DbId,
    #[validate(nested)]
    pub items: Vec<EquipmentItemInput>,
}
