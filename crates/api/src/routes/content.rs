//! Route definitions for the content authoring surface. Mounted at the
//! API root because the resources span several prefixes.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// ```text
/// PUT  /content                                    -> upsert_content
/// GET  /content                                    -> get_content
/// PUT  /content/{id}/departments/{department_id}   -> upsert_department_content
/// PUT  /sites/{id}/equipment                       -> replace_equipment
/// GET  /sites/{id}/equipment                       -> list_equipment
/// POST /documents                                  -> register_document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/content",
            put(content::upsert_content).get(content::get_content),
        )
        .route(
            "/content/{id}/departments/{department_id}",
            put(content::upsert_department_content),
        )
        .route(
            "/sites/{id}/equipment",
            put(content::replace_equipment).get(content::list_equipment),
        )
        .route("/documents", post(content::register_document))
}
