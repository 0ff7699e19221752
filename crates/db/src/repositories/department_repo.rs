//! Repository for the `departments` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::department::{CreateDepartment, Department};

/// Column list for `departments` queries.
const COLUMNS: &str = "id, tenant_id, site_id, name, is_active, created_at, updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (tenant_id, site_id, name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(input.tenant_id)
            .bind(input.site_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// IDs of every active department of a site, used to expand the
    /// unrestricted-host sentinel.
    pub async fn active_ids_by_site(
        pool: &PgPool,
        site_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM departments WHERE site_id = $1 AND is_active ORDER BY id",
        )
        .bind(site_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Fetch a set of departments by ID, active ones only.
    pub async fn find_active_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM departments \
             WHERE id = ANY($1) AND is_active \
             ORDER BY name"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
