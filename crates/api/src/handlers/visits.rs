//! Handlers for the `/visits` resource.
//!
//! Thin CRUD over the visit lifecycle plus host assignment and visitor
//! registration. Status transitions are validated against the core
//! lifecycle before any write.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use frontdesk_core::error::CoreError;
use frontdesk_core::identity;
use frontdesk_core::types::DbId;
use frontdesk_core::visit::VisitStatus;
use frontdesk_db::models::visit::{AssignVisitHosts, CreateVisit, UpdateVisitStatus, Visit, VisitListQuery};
use frontdesk_db::models::visitor::{CreateVisitor, Visitor};
use frontdesk_db::repositories::{HostRepo, VisitRepo, VisitorRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /visits/{id}`.
#[derive(Debug, Serialize)]
pub struct VisitDetail {
    #[serde(flatten)]
    pub visit: Visit,
    pub host_ids: Vec<DbId>,
    pub visitors: Vec<Visitor>,
}

/// POST /api/v1/visits
pub async fn create_visit(
    State(state): State<AppState>,
    Json(input): Json<CreateVisit>,
) -> AppResult<(StatusCode, Json<DataResponse<Visit>>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let visit = VisitRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: visit })))
}

/// GET /api/v1/visits
pub async fn list_visits(
    State(state): State<AppState>,
    Query(params): Query<VisitListQuery>,
) -> AppResult<Json<DataResponse<Vec<Visit>>>> {
    let visits = VisitRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: visits }))
}

/// GET /api/v1/visits/{id}
pub async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VisitDetail>>> {
    let visit = find_visit(&state, id).await?;
    let host_ids = VisitRepo::host_ids(&state.pool, id).await?;
    let visitors = VisitorRepo::list_by_visit(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: VisitDetail {
            visit,
            host_ids,
            visitors,
        },
    }))
}

/// PUT /api/v1/visits/{id}/status
///
/// Lifecycle transition; rejected with 409 when the transition is not
/// allowed from the current status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVisitStatus>,
) -> AppResult<Json<DataResponse<Visit>>> {
    let visit = find_visit(&state, id).await?;
    let current = VisitStatus::from_str_db(&visit.status)?;
    let next = VisitStatus::from_str_db(&input.status)?;
    current.validate_transition(next)?;

    let updated = VisitRepo::update_status(&state.pool, id, next.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visit",
            id,
        })?;
    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/visits/{id}/hosts
///
/// Replace the hosts assigned to a visit. Every host must exist and
/// belong to the visit's tenant.
pub async fn set_hosts(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignVisitHosts>,
) -> AppResult<Json<DataResponse<Vec<DbId>>>> {
    let visit = find_visit(&state, id).await?;
    for host_id in &input.host_ids {
        let host = HostRepo::find_by_id(&state.pool, *host_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "host",
                id: *host_id,
            })?;
        if host.tenant_id != visit.tenant_id {
            return Err(CoreError::Validation(format!(
                "Host {host_id} belongs to a different tenant"
            ))
            .into());
        }
    }

    VisitRepo::set_hosts(&state.pool, id, &input.host_ids).await?;
    let host_ids = VisitRepo::host_ids(&state.pool, id).await?;
    Ok(Json(DataResponse { data: host_ids }))
}

/// POST /api/v1/visits/{id}/visitors
///
/// Register a visitor on a visit. The identity key is derived here from
/// the normalized name/email so repeat visits match for skip evaluation.
pub async fn add_visitor(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<DataResponse<Visitor>>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let visit = find_visit(&state, id).await?;
    let identity_key = identity::identity_key(
        &input.first_name,
        &input.last_name,
        input.email.as_deref(),
    );

    let visitor = VisitorRepo::create(
        &state.pool,
        visit.tenant_id,
        visit.id,
        &input,
        identity_key.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: visitor })))
}

async fn find_visit(state: &AppState, id: DbId) -> AppResult<Visit> {
    Ok(VisitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visit",
            id,
        })?)
}
