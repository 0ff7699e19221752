//! Route definitions for visitor presence and training, mounted at
//! `/visitors`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::visitors;
use crate::state::AppState;

/// ```text
/// POST /{id}/check-in   -> check_in
/// POST /{id}/check-out  -> check_out
/// GET  /{id}/training   -> training_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/check-in", post(visitors::check_in))
        .route("/{id}/check-out", post(visitors::check_out))
        .route("/{id}/training", get(visitors::training_summary))
}
