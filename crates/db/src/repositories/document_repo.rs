//! Repository for the `documents` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::document::{CreateDocument, Document};

/// Column list for `documents` queries.
const COLUMNS: &str = "id, tenant_id, file_name, storage_key, content_type, created_at, updated_at";

/// Provides CRUD operations for stored document references.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Register a stored document reference.
    pub async fn create(pool: &PgPool, input: &CreateDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (tenant_id, file_name, storage_key, content_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(input.tenant_id)
            .bind(&input.file_name)
            .bind(&input.storage_key)
            .bind(&input.content_type)
            .fetch_one(pool)
            .await
    }

    /// Find a document by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch documents by ID, preserving no particular order.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Document>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
