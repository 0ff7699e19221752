//! Repository for the `flow_sessions` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::flow_session::FlowSession;

/// Column list for `flow_sessions` queries.
const COLUMNS: &str = "\
    id, tenant_id, visit_id, session_key, channel, language, visitor_ids, steps, \
    created_at, updated_at";

/// Provides operations for the flow session carrier.
pub struct FlowSessionRepo;

impl FlowSessionRepo {
    /// Persist a new flow session with its frozen step catalog.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        visit_id: DbId,
        session_key: &str,
        channel: &str,
        language: &str,
        visitor_ids: &[DbId],
        steps: &[String],
    ) -> Result<FlowSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO flow_sessions \
             (tenant_id, visit_id, session_key, channel, language, visitor_ids, steps) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlowSession>(&query)
            .bind(tenant_id)
            .bind(visit_id)
            .bind(session_key)
            .bind(channel)
            .bind(language)
            .bind(visitor_ids)
            .bind(steps)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its opaque key.
    pub async fn find_by_key(
        pool: &PgPool,
        session_key: &str,
    ) -> Result<Option<FlowSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flow_sessions WHERE session_key = $1");
        sqlx::query_as::<_, FlowSession>(&query)
            .bind(session_key)
            .fetch_optional(pool)
            .await
    }
}
