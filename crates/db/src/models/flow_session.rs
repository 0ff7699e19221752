//! Flow session model.

use serde::Serialize;
use sqlx::FromRow;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `flow_sessions` table: the session/progress carrier of
/// one started training flow. It remembers only which visitors belong to
/// the flow and the step catalog frozen at flow start; per-step progress
/// stays on the visitor rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlowSession {
    pub id: DbId,
    pub tenant_id: DbId,
    pub visit_id: DbId,
    pub session_key: String,
    pub channel: String,
    pub language: String,
    pub visitor_ids: Vec<DbId>,
    pub steps: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
