//! Repository for the `visitors` table.
//!
//! Training mutations are single conditional UPDATEs on one visitor row;
//! there is no cross-row locking. Step flags are only ever set, never
//! cleared, so duplicate confirmations are harmless at this layer.

use sqlx::PgPool;

use frontdesk_core::steps::StepKind;
use frontdesk_core::types::{DbId, Timestamp};
use frontdesk_core::validity::PriorCompletion;

use crate::models::visitor::{CreateVisitor, Visitor};

/// Column list for `visitors` queries.
const COLUMNS: &str = "\
    id, tenant_id, visit_id, first_name, last_name, email, company, identity_key, \
    participation_status, presence_status, \
    video_done, map_done, risks_done, department_done, equipment_done, action_info_done, \
    training_status, training_skipped, training_version, \
    training_started_at, training_completed_at, \
    created_at, updated_at";

/// The boolean column backing a step flag.
fn flag_column(step: StepKind) -> &'static str {
    match step {
        StepKind::Video => "video_done",
        StepKind::Map => "map_done",
        StepKind::Risks => "risks_done",
        StepKind::Department => "department_done",
        StepKind::Equipment => "equipment_done",
        StepKind::ActionInfo => "action_info_done",
    }
}

/// Provides CRUD and training-state operations for visitors.
pub struct VisitorRepo;

impl VisitorRepo {
    /// Insert a new visitor on a visit.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        visit_id: DbId,
        input: &CreateVisitor,
        identity_key: Option<&str>,
    ) -> Result<Visitor, sqlx::Error> {
        let query = format!(
            "INSERT INTO visitors \
             (tenant_id, visit_id, first_name, last_name, email, company, identity_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(tenant_id)
            .bind(visit_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(identity_key)
            .fetch_one(pool)
            .await
    }

    /// Find a visitor by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visitors WHERE id = $1");
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the visitors of a visit.
    pub async fn list_by_visit(pool: &PgPool, visit_id: DbId) -> Result<Vec<Visitor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visitors WHERE visit_id = $1 ORDER BY id");
        sqlx::query_as::<_, Visitor>(&query)
            .bind(visit_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch visitors by ID.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Visitor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visitors WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Visitor>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Persist one step confirmation.
    ///
    /// Sets the step flag and the new status; `training_started_at` is
    /// stamped at most once via COALESCE, and the completion stamp plus
    /// version are only written when this confirmation finishes the
    /// training. Re-running the same statement leaves the row unchanged.
    pub async fn confirm_step(
        pool: &PgPool,
        id: DbId,
        step: StepKind,
        status: &str,
        completed: bool,
        training_version: i32,
    ) -> Result<Option<Visitor>, sqlx::Error> {
        let flag = flag_column(step);
        let query = format!(
            "UPDATE visitors SET \
                 {flag} = TRUE, \
                 training_status = $2, \
                 training_started_at = COALESCE(training_started_at, NOW()), \
                 training_completed_at = CASE WHEN $3 \
                     THEN COALESCE(training_completed_at, NOW()) \
                     ELSE training_completed_at END, \
                 training_version = CASE WHEN $3 THEN $4 ELSE training_version END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .bind(status)
            .bind(completed)
            .bind(training_version)
            .fetch_optional(pool)
            .await
    }

    /// Move a visitor's training to `skipped`.
    ///
    /// Only pending or in-progress trainings can be skipped; the guard in
    /// the WHERE clause makes concurrent retries idempotent against an
    /// already-finished training. Step flags are left untouched.
    pub async fn mark_skipped(
        pool: &PgPool,
        id: DbId,
        training_version: i32,
    ) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!(
            "UPDATE visitors SET \
                 training_status = 'skipped', \
                 training_skipped = TRUE, \
                 training_version = $2 \
             WHERE id = $1 AND training_status IN ('pending', 'in_progress') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .bind(training_version)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending visitor's training as `not_available` (zero
    /// applicable steps at flow start).
    pub async fn mark_not_available(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!(
            "UPDATE visitors SET training_status = 'not_available' \
             WHERE id = $1 AND training_status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recent completed training of the same person within the
    /// tenant, excluding the visitor row being evaluated.
    pub async fn prior_completion(
        pool: &PgPool,
        tenant_id: DbId,
        identity_key: &str,
        exclude_visitor_id: DbId,
    ) -> Result<Option<PriorCompletion>, sqlx::Error> {
        let row: Option<(Timestamp, Option<i32>)> = sqlx::query_as(
            "SELECT training_completed_at, training_version FROM visitors \
             WHERE tenant_id = $1 \
               AND identity_key = $2 \
               AND id <> $3 \
               AND training_status = 'completed' \
               AND training_completed_at IS NOT NULL \
             ORDER BY training_completed_at DESC \
             LIMIT 1",
        )
        .bind(tenant_id)
        .bind(identity_key)
        .bind(exclude_visitor_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(completed_at, training_version)| PriorCompletion {
            completed_at,
            training_version,
        }))
    }

    /// Update the presence status of a visitor (check-in/check-out).
    pub async fn update_presence(
        pool: &PgPool,
        id: DbId,
        presence_status: &str,
    ) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!(
            "UPDATE visitors SET presence_status = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .bind(presence_status)
            .fetch_optional(pool)
            .await
    }
}
