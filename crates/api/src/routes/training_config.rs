//! Route definitions for the per-tenant training configuration, mounted
//! at `/tenants`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::training_config;
use crate::state::AppState;

/// ```text
/// GET  /{id}/training-config               -> get_config
/// PUT  /{id}/training-config               -> update_config
/// POST /{id}/training-config/bump-version  -> bump_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/training-config",
            get(training_config::get_config).put(training_config::update_config),
        )
        .route(
            "/{id}/training-config/bump-version",
            post(training_config::bump_version),
        )
}
