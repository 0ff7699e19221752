//! Route definitions for the training flow engine, mounted at `/flows`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::flows;
use crate::state::AppState;

/// ```text
/// POST /                                           -> start_flow
/// GET  /{key}                                      -> get_flow
/// GET  /{key}/visitors/{visitor_id}/current-step   -> current_step
/// POST /{key}/visitors/{visitor_id}/steps/{step}/confirm -> confirm_step
/// POST /{key}/visitors/{visitor_id}/skip           -> skip_training
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(flows::start_flow))
        .route("/{key}", get(flows::get_flow))
        .route(
            "/{key}/visitors/{visitor_id}/current-step",
            get(flows::current_step),
        )
        .route(
            "/{key}/visitors/{visitor_id}/steps/{step}/confirm",
            post(flows::confirm_step),
        )
        .route("/{key}/visitors/{visitor_id}/skip", post(flows::skip_training))
}
