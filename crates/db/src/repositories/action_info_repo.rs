//! Repository for the `action_infos` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::action_info::{ActionInfo, UpsertActionInfo};

/// Column list for `action_infos` queries.
const COLUMNS: &str =
    "id, tenant_id, visit_id, instructions, document_ids, created_at, updated_at";

/// Provides operations for per-visit action instructions.
pub struct ActionInfoRepo;

impl ActionInfoRepo {
    /// Author the instructions of a visit (at most one row per visit).
    pub async fn upsert(
        pool: &PgPool,
        tenant_id: DbId,
        visit_id: DbId,
        input: &UpsertActionInfo,
    ) -> Result<ActionInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_infos (tenant_id, visit_id, instructions, document_ids) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_action_infos_visit DO UPDATE SET \
                 instructions = EXCLUDED.instructions, \
                 document_ids = EXCLUDED.document_ids \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionInfo>(&query)
            .bind(tenant_id)
            .bind(visit_id)
            .bind(&input.instructions)
            .bind(&input.document_ids)
            .fetch_one(pool)
            .await
    }

    /// The instructions of a visit, if any.
    pub async fn find_by_visit(
        pool: &PgPool,
        visit_id: DbId,
    ) -> Result<Option<ActionInfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM action_infos WHERE visit_id = $1");
        sqlx::query_as::<_, ActionInfo>(&query)
            .bind(visit_id)
            .fetch_optional(pool)
            .await
    }
}
