#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use frontdesk_api::config::ServerConfig;
use frontdesk_api::router::build_app_router;
use frontdesk_api::state::AppState;
use frontdesk_core::identity;
use frontdesk_db::models::department::CreateDepartment;
use frontdesk_db::models::document::CreateDocument;
use frontdesk_db::models::host::CreateHost;
use frontdesk_db::models::site::CreateSite;
use frontdesk_db::models::tenant::CreateTenant;
use frontdesk_db::models::training_content::UpsertTrainingContent;
use frontdesk_db::models::visit::CreateVisit;
use frontdesk_db::models::visitor::CreateVisitor;
use frontdesk_db::repositories::{
    DepartmentRepo, DocumentRepo, HostRepo, SiteRepo, TenantRepo, TrainingContentRepo, VisitRepo,
    VisitorRepo,
};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        document_base_url: "http://localhost:3000/documents".to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Integration tests exercise the same stack
/// (CORS, request ID, timeout, tracing, panic recovery) that production
/// uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request without a body.
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers (via the repository layer, keeping tests on HTTP behaviour)
// ---------------------------------------------------------------------------

pub async fn seed_tenant(pool: &PgPool, slug: &str) -> frontdesk_db::models::tenant::Tenant {
    TenantRepo::create(
        pool,
        &CreateTenant {
            name: format!("Tenant {slug}"),
            slug: slug.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_site(pool: &PgPool, tenant_id: i64) -> frontdesk_db::models::site::Site {
    SiteRepo::create(
        pool,
        &CreateSite {
            tenant_id,
            name: "Main plant".to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_department(
    pool: &PgPool,
    tenant_id: i64,
    site_id: i64,
    name: &str,
) -> frontdesk_db::models::department::Department {
    DepartmentRepo::create(
        pool,
        &CreateDepartment {
            tenant_id,
            site_id,
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_host(
    pool: &PgPool,
    tenant_id: i64,
    site_id: i64,
    name: &str,
) -> frontdesk_db::models::host::Host {
    HostRepo::create(
        pool,
        &CreateHost {
            tenant_id,
            site_id,
            display_name: name.to_string(),
            email: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_visit(
    pool: &PgPool,
    tenant_id: i64,
    site_id: i64,
) -> frontdesk_db::models::visit::Visit {
    VisitRepo::create(
        pool,
        &CreateVisit {
            tenant_id,
            site_id,
            subject: "Supplier audit".to_string(),
            scheduled_start: None,
            scheduled_end: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_visitor(
    pool: &PgPool,
    tenant_id: i64,
    visit_id: i64,
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
) -> frontdesk_db::models::visitor::Visitor {
    let input = CreateVisitor {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.map(str::to_string),
        company: None,
    };
    let key = identity::identity_key(first_name, last_name, email);
    VisitorRepo::create(pool, tenant_id, visit_id, &input, key.as_deref())
        .await
        .unwrap()
}

/// Author master content with a video and a risks text (two applicable
/// simple steps).
pub async fn seed_content(
    pool: &PgPool,
    tenant_id: i64,
    site_id: i64,
    language: &str,
) -> frontdesk_db::models::training_content::TrainingContent {
    TrainingContentRepo::upsert(
        pool,
        &UpsertTrainingContent {
            tenant_id,
            site_id,
            language: language.to_string(),
            video_url: Some("https://cdn.example.com/intro.mp4".to_string()),
            map_document_id: None,
            risks_text: Some("Wear your badge at all times.".to_string()),
            document_ids: vec![],
        },
    )
    .await
    .unwrap()
}

pub async fn seed_document(
    pool: &PgPool,
    tenant_id: i64,
    file_name: &str,
) -> frontdesk_db::models::document::Document {
    DocumentRepo::create(
        pool,
        &CreateDocument {
            tenant_id,
            file_name: file_name.to_string(),
            storage_key: format!("{tenant_id}/{file_name}"),
            content_type: Some("application/pdf".to_string()),
        },
    )
    .await
    .unwrap()
}
