//! Repository for the `training_contents` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::training_content::{TrainingContent, UpsertTrainingContent};

/// Column list for `training_contents` queries.
const COLUMNS: &str = "\
    id, tenant_id, site_id, language, video_url, map_document_id, risks_text, \
    document_ids, created_at, updated_at";

/// Provides authoring and lookup operations for master training content.
pub struct TrainingContentRepo;

impl TrainingContentRepo {
    /// Author the master content of a (site, language), replacing any
    /// previous row (content is authored once, read many times).
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertTrainingContent,
    ) -> Result<TrainingContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_contents \
             (tenant_id, site_id, language, video_url, map_document_id, risks_text, document_ids) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT ON CONSTRAINT uq_training_contents_site_language DO UPDATE SET \
                 video_url = EXCLUDED.video_url, \
                 map_document_id = EXCLUDED.map_document_id, \
                 risks_text = EXCLUDED.risks_text, \
                 document_ids = EXCLUDED.document_ids \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingContent>(&query)
            .bind(input.tenant_id)
            .bind(input.site_id)
            .bind(&input.language)
            .bind(&input.video_url)
            .bind(input.map_document_id)
            .bind(&input.risks_text)
            .bind(&input.document_ids)
            .fetch_one(pool)
            .await
    }

    /// Find a content row by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_contents WHERE id = $1");
        sqlx::query_as::<_, TrainingContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The master content of one (tenant, site, language) scope. No
    /// cross-language fallback happens here or anywhere else.
    pub async fn find_by_scope(
        pool: &PgPool,
        tenant_id: DbId,
        site_id: DbId,
        language: &str,
    ) -> Result<Option<TrainingContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_contents \
             WHERE tenant_id = $1 AND site_id = $2 AND language = $3"
        );
        sqlx::query_as::<_, TrainingContent>(&query)
            .bind(tenant_id)
            .bind(site_id)
            .bind(language)
            .fetch_optional(pool)
            .await
    }

    /// List all languages authored for a site.
    pub async fn list_by_site(
        pool: &PgPool,
        site_id: DbId,
    ) -> Result<Vec<TrainingContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_contents WHERE site_id = $1 ORDER BY language"
        );
        sqlx::query_as::<_, TrainingContent>(&query)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }
}
