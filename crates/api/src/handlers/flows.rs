//! Handlers for the `/flows` resource: the training flow engine surface.
//!
//! All flow state is addressed by the opaque session key issued at flow
//! start; per-visitor progress lives on the visitor rows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use frontdesk_core::steps::StepKind;
use frontdesk_core::types::DbId;

use crate::engine::flow::{self, FlowHandleView, StartFlow, VisitorStateView};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET .../current-step`.
#[derive(Debug, Serialize)]
pub struct CurrentStepResponse {
    pub visitor_id: DbId,
    /// The next unconfirmed step, or null when the training is finished
    /// or was bypassed.
    pub current_step: Option<StepKind>,
}

/// POST /api/v1/flows
///
/// Start a training flow for a visit: skip evaluation, content
/// resolution, step-catalog freezing, session creation.
pub async fn start_flow(
    State(state): State<AppState>,
    Json(input): Json<StartFlow>,
) -> AppResult<(StatusCode, Json<DataResponse<FlowHandleView>>)> {
    let handle = flow::start_flow(&state, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: handle })))
}

/// GET /api/v1/flows/{key}
///
/// Re-read a flow handle: stored step catalog, fresh visitor states.
pub async fn get_flow(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<FlowHandleView>>> {
    let handle = flow::get_flow(&state, &key).await?;
    Ok(Json(DataResponse { data: handle }))
}

/// GET /api/v1/flows/{key}/visitors/{visitor_id}/current-step
pub async fn current_step(
    State(state): State<AppState>,
    Path((key, visitor_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<CurrentStepResponse>>> {
    let current = flow::current_step(&state, &key, visitor_id).await?;
    Ok(Json(DataResponse {
        data: CurrentStepResponse {
            visitor_id,
            current_step: current,
        },
    }))
}

/// POST /api/v1/flows/{key}/visitors/{visitor_id}/steps/{step}/confirm
///
/// Idempotent step confirmation under the session's channel policy.
pub async fn confirm_step(
    State(state): State<AppState>,
    Path((key, visitor_id, step)): Path<(String, DbId, String)>,
) -> AppResult<Json<DataResponse<VisitorStateView>>> {
    let view = flow::confirm_step(&state, &key, visitor_id, &step).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/flows/{key}/visitors/{visitor_id}/skip
///
/// Skip the entire training; only the free channel policy allows this.
pub async fn skip_training(
    State(state): State<AppState>,
    Path((key, visitor_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<VisitorStateView>>> {
    let view = flow::skip_training(&state, &key, visitor_id).await?;
    Ok(Json(DataResponse { data: view }))
}
