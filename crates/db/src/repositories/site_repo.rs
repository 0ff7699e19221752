//! Repository for the `sites` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::site::{CreateSite, Site};

/// Column list for `sites` queries.
const COLUMNS: &str = "id, tenant_id, name, is_active, created_at, updated_at";

/// Provides CRUD operations for sites.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site.
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (tenant_id, name) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(input.tenant_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a site by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE id = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the sites of a tenant.
    pub async fn list_by_tenant(pool: &PgPool, tenant_id: DbId) -> Result<Vec<Site>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sites WHERE tenant_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }
}
