//! Repository for the `hosts` and `host_departments` tables.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::host::{CreateHost, Host};

/// Column list for `hosts` queries.
const COLUMNS: &str = "id, tenant_id, site_id, display_name, email, created_at, updated_at";

/// Provides CRUD operations for hosts and their department membership.
pub struct HostRepo;

impl HostRepo {
    /// Insert a new host.
    pub async fn create(pool: &PgPool, input: &CreateHost) -> Result<Host, sqlx::Error> {
        let query = format!(
            "INSERT INTO hosts (tenant_id, site_id, display_name, email) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Host>(&query)
            .bind(input.tenant_id)
            .bind(input.site_id)
            .bind(&input.display_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a host by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Host>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hosts WHERE id = $1");
        sqlx::query_as::<_, Host>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The department IDs a host is explicitly assigned to. An empty
    /// result means the host is unrestricted, not department-less.
    pub async fn department_ids(pool: &PgPool, host_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT department_id FROM host_departments WHERE host_id = $1 ORDER BY department_id",
        )
        .bind(host_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace a host's department assignments.
    pub async fn set_departments(
        pool: &PgPool,
        host_id: DbId,
        department_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM host_departments WHERE host_id = $1")
            .bind(host_id)
            .execute(&mut *tx)
            .await?;
        for department_id in department_ids {
            sqlx::query(
                "INSERT INTO host_departments (host_id, department_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT ON CONSTRAINT uq_host_departments_host_department DO NOTHING",
            )
            .bind(host_id)
            .bind(department_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
