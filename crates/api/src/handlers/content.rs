//! Handlers for the content authoring surface: master training content,
//! department briefings, equipment lists, per-visit instructions and
//! document references.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use frontdesk_core::content::validate_language;
use frontdesk_core::error::CoreError;
use frontdesk_core::types::DbId;
use frontdesk_db::models::action_info::{ActionInfo, UpsertActionInfo};
use frontdesk_db::models::department_content::{DepartmentContent, UpsertDepartmentContent};
use frontdesk_db::models::document::{CreateDocument, Document};
use frontdesk_db::models::equipment_requirement::{EquipmentRequirement, ReplaceEquipment};
use frontdesk_db::models::training_content::{TrainingContent, UpsertTrainingContent};
use frontdesk_db::repositories::{
    ActionInfoRepo, DepartmentContentRepo, DocumentRepo, EquipmentRepo, TrainingContentRepo,
    VisitRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters addressing one master content scope.
#[derive(Debug, Deserialize)]
pub struct ContentScopeQuery {
    pub tenant_id: DbId,
    pub site_id: DbId,
    pub language: String,
}

/// PUT /api/v1/content
///
/// Author the master content of a (site, language). Content is authored
/// once and read many times; the upsert replaces any previous row.
pub async fn upsert_content(
    State(state): State<AppState>,
    Json(input): Json<UpsertTrainingContent>,
) -> AppResult<Json<DataResponse<TrainingContent>>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    validate_language(&input.language)?;

    let content = TrainingContentRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: content }))
}

/// GET /api/v1/content?tenant_id=&site_id=&language=
///
/// The master content of one scope. No cross-language fallback: an
/// unauthored language is a plain 404.
pub async fn get_content(
    State(state): State<AppState>,
    Query(scope): Query<ContentScopeQuery>,
) -> AppResult<Json<DataResponse<TrainingContent>>> {
    let content =
        TrainingContentRepo::find_by_scope(&state.pool, scope.tenant_id, scope.site_id, &scope.language)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No training content for site {} in language '{}'",
                    scope.site_id, scope.language
                ))
            })?;
    Ok(Json(DataResponse { data: content }))
}

/// PUT /api/v1/content/{id}/departments/{department_id}
///
/// Author one department's briefing under a master content row.
pub async fn upsert_department_content(
    State(state): State<AppState>,
    Path((content_id, department_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpsertDepartmentContent>,
) -> AppResult<Json<DataResponse<DepartmentContent>>> {
    let content = TrainingContentRepo::find_by_id(&state.pool, content_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "training content",
            id: content_id,
        })?;

    let briefing = DepartmentContentRepo::upsert(
        &state.pool,
        content.tenant_id,
        content.id,
        department_id,
        &input,
    )
    .await?;
    Ok(Json(DataResponse { data: briefing }))
}

/// PUT /api/v1/sites/{id}/equipment
///
/// Replace the active equipment list of a site.
pub async fn replace_equipment(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
    Json(input): Json<ReplaceEquipment>,
) -> AppResult<Json<DataResponse<Vec<EquipmentRequirement>>>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let items = EquipmentRepo::replace_for_site(&state.pool, site_id, &input).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/sites/{id}/equipment
pub async fn list_equipment(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<EquipmentRequirement>>>> {
    let items = EquipmentRepo::list_active_by_site(&state.pool, site_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// PUT /api/v1/visits/{id}/action-info
///
/// Author the visit-specific instructions (at most one row per visit).
pub async fn upsert_action_info(
    State(state): State<AppState>,
    Path(visit_id): Path<DbId>,
    Json(input): Json<UpsertActionInfo>,
) -> AppResult<Json<DataResponse<ActionInfo>>> {
    let visit = VisitRepo::find_by_id(&state.pool, visit_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visit",
            id: visit_id,
        })?;

    let info = ActionInfoRepo::upsert(&state.pool, visit.tenant_id, visit.id, &input).await?;
    Ok(Json(DataResponse { data: info }))
}

/// POST /api/v1/documents
///
/// Register a stored document reference. Bytes live in external storage;
/// only the storage key travels through this API.
pub async fn register_document(
    State(state): State<AppState>,
    Json(input): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let document = DocumentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}
