//! Host entity model and DTOs.
//!
//! A host is a person responsible for a visit. Department membership lives
//! in `host_departments`; a host with zero membership rows is treated as
//! unrestricted (access to every active department of the site).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `hosts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Host {
    pub id: DbId,
    pub tenant_id: DbId,
    pub site_id: DbId,
    pub display_name: String,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a host.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHost {
    pub tenant_id: DbId,
    pub site_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub display_name: String,
    #[validate(email)]
    pub email: Option<String>,
}
