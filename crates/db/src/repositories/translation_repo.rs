//! Repository for the `translations` table.

use sqlx::PgPool;

use frontdesk_core::types::DbId;

/// Provides the `translate(key, fallback)` lookup over tenant label
/// overrides.
pub struct TranslationRepo;

impl TranslationRepo {
    /// Look up one label override.
    pub async fn lookup(
        pool: &PgPool,
        tenant_id: DbId,
        lang: &str,
        key: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT value FROM translations \
             WHERE tenant_id = $1 AND lang = $2 AND key = $3",
        )
        .bind(tenant_id)
        .bind(lang)
        .bind(key)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Resolve a user-facing label: the tenant's override when present,
    /// the given fallback otherwise. Lookup failures degrade to the
    /// fallback -- a missing label must never block a flow.
    pub async fn translate(
        pool: &PgPool,
        tenant_id: DbId,
        lang: &str,
        key: &str,
        fallback: &str,
    ) -> String {
        match Self::lookup(pool, tenant_id, lang, key).await {
            Ok(Some(value)) => value,
            Ok(None) => fallback.to_string(),
            Err(err) => {
                tracing::warn!(tenant_id, lang, key, error = %err, "Translation lookup failed");
                fallback.to_string()
            }
        }
    }

    /// Upsert one label override.
    pub async fn set(
        pool: &PgPool,
        tenant_id: DbId,
        lang: &str,
        key: &str,
        value: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO translations (tenant_id, lang, key, value) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_translations_tenant_lang_key \
                 DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(tenant_id)
        .bind(lang)
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }
}
