//! Repository for the `visits` and `visit_hosts` tables.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::visit::{CreateVisit, Visit, VisitListQuery};

/// Column list for `visits` queries.
const COLUMNS: &str = "\
    id, tenant_id, site_id, subject, status, \
    scheduled_start, scheduled_end, created_at, updated_at";

/// Maximum page size for visit listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for visit listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for visits and their host assignments.
pub struct VisitRepo;

impl VisitRepo {
    /// Insert a new visit in `draft` status.
    pub async fn create(pool: &PgPool, input: &CreateVisit) -> Result<Visit, sqlx::Error> {
        let query = format!(
            "INSERT INTO visits (tenant_id, site_id, subject, scheduled_start, scheduled_end) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(input.tenant_id)
            .bind(input.site_id)
            .bind(&input.subject)
            .bind(input.scheduled_start)
            .bind(input.scheduled_end)
            .fetch_one(pool)
            .await
    }

    /// Find a visit by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visits WHERE id = $1");
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List visits of a tenant with optional site/status filters.
    pub async fn list(pool: &PgPool, params: &VisitListQuery) -> Result<Vec<Visit>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM visits \
             WHERE tenant_id = $1 \
               AND ($2::BIGINT IS NULL OR site_id = $2) \
               AND ($3::TEXT IS NULL OR status = $3) \
             ORDER BY scheduled_start DESC NULLS LAST, id DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(params.tenant_id)
            .bind(params.site_id)
            .bind(&params.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update the status of a visit. Transition validity is checked by the
    /// caller against the core lifecycle.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!(
            "UPDATE visits SET status = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// The distinct host IDs assigned to a visit.
    pub async fn host_ids(pool: &PgPool, visit_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT host_id FROM visit_hosts WHERE visit_id = $1 ORDER BY host_id",
        )
        .bind(visit_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace the hosts assigned to a visit.
    pub async fn set_hosts(
        pool: &PgPool,
        visit_id: DbId,
        host_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM visit_hosts WHERE visit_id = $1")
            .bind(visit_id)
            .execute(&mut *tx)
            .await?;
        for host_id in host_ids {
            sqlx::query(
                "INSERT INTO visit_hosts (visit_id, host_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT ON CONSTRAINT uq_visit_hosts_visit_host DO NOTHING",
            )
            .bind(visit_id)
            .bind(host_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
