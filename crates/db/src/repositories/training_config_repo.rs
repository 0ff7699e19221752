//! Repository for the `training_configs` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::training_config::{TrainingConfig, UpdateTrainingConfig};

/// Column list for `training_configs` queries.
const COLUMNS: &str = "\
    id, tenant_id, skip_threshold_days, require_quiz, passing_score, training_version, \
    created_at, updated_at";

/// Provides operations for per-tenant training configuration.
pub struct TrainingConfigRepo;

impl TrainingConfigRepo {
    /// Get the tenant's config, creating one with defaults on first
    /// access. The no-op DO UPDATE guarantees RETURNING always yields a
    /// row.
    pub async fn get_or_create(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<TrainingConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_configs (tenant_id) \
             VALUES ($1) \
             ON CONFLICT ON CONSTRAINT uq_training_configs_tenant \
                 DO UPDATE SET tenant_id = training_configs.tenant_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingConfig>(&query)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
    }

    /// Partial update of a tenant's config.
    pub async fn update(
        pool: &PgPool,
        tenant_id: DbId,
        input: &UpdateTrainingConfig,
    ) -> Result<Option<TrainingConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE training_configs SET \
                 skip_threshold_days = COALESCE($2, skip_threshold_days), \
                 require_quiz = COALESCE($3, require_quiz), \
                 passing_score = COALESCE($4, passing_score) \
             WHERE tenant_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingConfig>(&query)
            .bind(tenant_id)
            .bind(input.skip_threshold_days)
            .bind(input.require_quiz)
            .bind(input.passing_score)
            .fetch_optional(pool)
            .await
    }

    /// Bump the training version, semantically invalidating every prior
    /// completion for skip evaluation.
    pub async fn bump_version(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Option<TrainingConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE training_configs SET training_version = training_version + 1 \
             WHERE tenant_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingConfig>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }
}
