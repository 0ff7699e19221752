pub mod content;
pub mod flows;
pub mod health;
pub mod training_config;
pub mod visits;
pub mod visitors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /flows                                           start flow (POST)
/// /flows/{key}                                     read handle
/// /flows/{key}/visitors/{id}/current-step          next unconfirmed step
/// /flows/{key}/visitors/{id}/steps/{step}/confirm  confirm step (POST)
/// /flows/{key}/visitors/{id}/skip                  skip training (POST)
///
/// /visits                                          list, create
/// /visits/{id}                                     detail
/// /visits/{id}/status                              lifecycle transition (PUT)
/// /visits/{id}/hosts                               replace hosts (PUT)
/// /visits/{id}/visitors                            add visitor (POST)
/// /visits/{id}/action-info                         author instructions (PUT)
///
/// /visitors/{id}/check-in                          presence (POST)
/// /visitors/{id}/check-out                         presence (POST)
/// /visitors/{id}/training                          training summary
///
/// /content                                         author/read master content
/// /content/{id}/departments/{department_id}        author briefing (PUT)
/// /sites/{id}/equipment                            replace/read equipment
/// /documents                                       register reference (POST)
///
/// /tenants/{id}/training-config                    read/update config
/// /tenants/{id}/training-config/bump-version       invalidate completions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/flows", flows::router())
        .nest("/visits", visits::router())
        .nest("/visitors", visitors::router())
        .nest("/tenants", training_config::router())
        .merge(content::router())
}
