//! Route definitions for the visit lifecycle, mounted at `/visits`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{content, visits};
use crate::state::AppState;

/// ```text
/// POST /                   -> create_visit
/// GET  /                   -> list_visits
/// GET  /{id}               -> get_visit
/// PUT  /{id}/status        -> update_status
/// PUT  /{id}/hosts         -> set_hosts
/// POST /{id}/visitors      -> add_visitor
/// PUT  /{id}/action-info   -> upsert_action_info
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(visits::create_visit).get(visits::list_visits))
        .route("/{id}", get(visits::get_visit))
        .route("/{id}/status", put(visits::update_status))
        .route("/{id}/hosts", put(visits::set_hosts))
        .route("/{id}/visitors", post(visits::add_visitor))
        .route("/{id}/action-info", put(content::upsert_action_info))
}
