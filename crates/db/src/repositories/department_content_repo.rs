//! Repository for the `department_contents` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::department_content::{DepartmentContent, UpsertDepartmentContent};

/// Column list for `department_contents` queries.
const COLUMNS: &str = "\
    id, tenant_id, training_content_id, department_id, body_text, document_ids, \
    created_at, updated_at";

/// Provides authoring and lookup operations for department briefings.
pub struct DepartmentContentRepo;

impl DepartmentContentRepo {
    /// Author the briefing of one (content, department) pair.
    pub async fn upsert(
        pool: &PgPool,
        tenant_id: DbId,
        training_content_id: DbId,
        department_id: DbId,
        input: &UpsertDepartmentContent,
    ) -> Result<DepartmentContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO department_contents \
             (tenant_id, training_content_id, department_id, body_text, document_ids) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT ON CONSTRAINT uq_department_contents_content_department DO UPDATE SET \
                 body_text = EXCLUDED.body_text, \
                 document_ids = EXCLUDED.document_ids \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DepartmentContent>(&query)
            .bind(tenant_id)
            .bind(training_content_id)
            .bind(department_id)
            .bind(&input.body_text)
            .bind(&input.document_ids)
            .fetch_one(pool)
            .await
    }

    /// The briefings of a content row restricted to the given department
    /// set AND to rows with real content (non-empty text or at least one
    /// document). Empty briefings are filtered out even when in scope.
    pub async fn find_with_content(
        pool: &PgPool,
        training_content_id: DbId,
        department_ids: &[DbId],
    ) -> Result<Vec<DepartmentContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM department_contents \
             WHERE training_content_id = $1 \
               AND department_id = ANY($2) \
               AND (btrim(body_text) <> '' OR cardinality(document_ids) > 0) \
             ORDER BY department_id"
        );
        sqlx::query_as::<_, DepartmentContent>(&query)
            .bind(training_content_id)
            .bind(department_ids)
            .fetch_all(pool)
            .await
    }
}
