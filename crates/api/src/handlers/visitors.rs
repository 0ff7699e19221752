//! Handlers for the `/visitors` resource: presence and training summary.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use frontdesk_core::error::CoreError;
use frontdesk_core::types::DbId;
use frontdesk_core::visit::PresenceStatus;
use frontdesk_db::models::visitor::Visitor;
use frontdesk_db::repositories::VisitorRepo;

use crate::engine::flow::{self, TrainingSummaryView};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /visitors/{id}/training`.
#[derive(Debug, Deserialize)]
pub struct TrainingQuery {
    /// Language applicability is resolved against. Defaults to `en`.
    pub language: Option<String>,
}

/// POST /api/v1/visitors/{id}/check-in
pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Visitor>>> {
    update_presence(&state, id, PresenceStatus::Present).await
}

/// POST /api/v1/visitors/{id}/check-out
pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Visitor>>> {
    update_presence(&state, id, PresenceStatus::CheckedOut).await
}

/// GET /api/v1/visitors/{id}/training
///
/// Training summary outside any session; applicability is re-resolved
/// from the current content of the visit.
pub async fn training_summary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<TrainingQuery>,
) -> AppResult<Json<DataResponse<TrainingSummaryView>>> {
    let language = query.language.as_deref().unwrap_or("en");
    let summary = flow::training_summary(&state, id, language).await?;
    Ok(Json(DataResponse { data: summary }))
}

async fn update_presence(
    state: &AppState,
    id: DbId,
    presence: PresenceStatus,
) -> AppResult<Json<DataResponse<Visitor>>> {
    let visitor = VisitorRepo::update_presence(&state.pool, id, presence.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visitor",
            id,
        })?;
    Ok(Json(DataResponse { data: visitor }))
}
