//! Handlers for the per-tenant training configuration.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use frontdesk_core::error::CoreError;
use frontdesk_core::types::DbId;
use frontdesk_db::models::training_config::{TrainingConfig, UpdateTrainingConfig};
use frontdesk_db::repositories::TrainingConfigRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tenants/{id}/training-config
///
/// The tenant's configuration, created with defaults on first access.
pub async fn get_config(
    State(state): State<AppState>,
    Path(tenant_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TrainingConfig>>> {
    let config = TrainingConfigRepo::get_or_create(&state.pool, tenant_id).await?;
    Ok(Json(DataResponse { data: config }))
}

/// PUT /api/v1/tenants/{id}/training-config
///
/// Partial update; absent fields keep their current value.
pub async fn update_config(
    State(state): State<AppState>,
    Path(tenant_id): Path<DbId>,
    Json(input): Json<UpdateTrainingConfig>,
) -> AppResult<Json<DataResponse<TrainingConfig>>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    // Ensure the row exists before the partial update.
    TrainingConfigRepo::get_or_create(&state.pool, tenant_id).await?;
    let config = TrainingConfigRepo::update(&state.pool, tenant_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "training config",
            id: tenant_id,
        })?;
    Ok(Json(DataResponse { data: config }))
}

/// POST /api/v1/tenants/{id}/training-config/bump-version
///
/// Increment the training version, invalidating every prior completion
/// for skip evaluation.
pub async fn bump_version(
    State(state): State<AppState>,
    Path(tenant_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TrainingConfig>>> {
    TrainingConfigRepo::get_or_create(&state.pool, tenant_id).await?;
    let config = TrainingConfigRepo::bump_version(&state.pool, tenant_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "training config",
            id: tenant_id,
        })?;

    tracing::info!(
        tenant_id,
        training_version = config.training_version,
        "Training version bumped"
    );
    Ok(Json(DataResponse { data: config }))
}
