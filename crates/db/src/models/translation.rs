//! Tenant label translation model.

use serde::Serialize;
use sqlx::FromRow;

use frontdesk_core::types::{DbId, Timestamp};

/// A row from the `translations` table: a per-tenant override for one
/// user-facing label, consulted by `translate(key, fallback)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Translation {
    pub id: DbId,
    pub tenant_id: DbId,
    pub lang: String,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
