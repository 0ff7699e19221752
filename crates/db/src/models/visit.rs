//! Visit entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `visits` table.
///
/// `status` follows the lifecycle guarded by
/// `frontdesk_core::visit::VisitStatus::validate_transition`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visit {
    pub id: DbId,
    pub tenant_id: DbId,
    pub site_id: DbId,
    pub subject: String,
    pub status: String,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a visit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVisit {
    pub tenant_id: DbId,
    pub site_id: DbId,
    #[validate(length(min = 1, max = 500))]
    pub subject: String,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
}

/// DTO for a visit status transition.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVisitStatus {
    pub status: String,
}

/// DTO replacing the set of hosts assigned to a visit.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignVisitHosts {
    pub host_ids: Vec<DbId>,
}

/// Query parameters for listing visits.
#[derive(Debug, Clone, Deserialize)]
pub struct VisitListQuery {
    pub tenant_id: DbId,
    pub site_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
