//! Repository for the `equipment_requirements` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

use crate::models::equipment_requirement::{EquipmentRequirement, ReplaceEquipment};

/// Column list for `equipment_requirements` queries.
const COLUMNS: &str = "\
    id, tenant_id, site_id, name, description, position, is_active, created_at, updated_at";

/// Provides operations for per-site protective-equipment requirements.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// The active equipment requirements of a site, in display order.
    pub async fn list_active_by_site(
        pool: &PgPool,
        site_id: DbId,
    ) -> Result<Vec<EquipmentRequirement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment_requirements \
             WHERE site_id = $1 AND is_active \
             ORDER BY position, id"
        );
        sqlx::query_as::<_, EquipmentRequirement>(&query)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the equipment list of a site. The old rows are deactivated
    /// rather than deleted so a frozen flow session keeps resolving.
    pub async fn replace_for_site(
        pool: &PgPool,
        site_id: DbId,
        input: &ReplaceEquipment,
    ) -> Result<Vec<EquipmentRequirement>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("UPDATE equipment_requirements SET is_active = FALSE WHERE site_id = $1")
            .bind(site_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO equipment_requirements (tenant_id, site_id, name, description, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(input.items.len());
        for (position, item) in input.items.iter().enumerate() {
            let row = sqlx::query_as::<_, EquipmentRequirement>(&insert)
                .bind(input.tenant_id)
                .bind(site_id)
                .bind(&item.name)
                .bind(&item.description)
                .bind(position as i32)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }
        tx.commit().await?;
        Ok(rows)
    }
}
