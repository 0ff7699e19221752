//! HTTP-level integration tests for the training flow engine.
//!
//! Prerequisite entities (tenants, sites, visits, visitors, content) are
//! seeded via the repository layer to keep the tests focused on flow
//! behaviour over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, post_empty, post_json, put_json, seed_content,
    seed_department, seed_host, seed_site, seed_tenant, seed_visit, seed_visitor,
};
use serde_json::json;
use sqlx::PgPool;

use frontdesk_db::models::department_content::UpsertDepartmentContent;
use frontdesk_db::repositories::{DepartmentContentRepo, TranslationRepo, VisitRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Start a flow and return the parsed `data` payload.
async fn start_flow(
    pool: &PgPool,
    visit_id: i64,
    channel: &str,
    visitor_ids: Option<Vec<i64>>,
) -> serde_json::Value {
    let mut body = json!({
        "visit_id": visit_id,
        "channel": channel,
        "language": "en",
    });
    if let Some(ids) = visitor_ids {
        body["visitor_ids"] = json!(ids);
    }
    let response = post_json(build_test_app(pool.clone()), "/api/v1/flows", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn steps_of(handle: &serde_json::Value) -> Vec<String> {
    handle["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Test: starting a flow freezes the applicable step catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn starting_a_flow_freezes_the_applicable_steps(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;

    assert!(!handle["session_key"].as_str().unwrap().is_empty());
    assert_eq!(handle["channel"], "kiosk");
    assert_eq!(steps_of(&handle), vec!["video", "risks"]);

    let visitor = &handle["visitors"][0];
    assert_eq!(visitor["training_status"], "pending");
    assert_eq!(visitor["next_step"], "video");
    assert_eq!(
        handle["content"]["video_url"],
        "https://cdn.example.com/intro.mp4"
    );
}

// ---------------------------------------------------------------------------
// Test: a visit with no hosts has no department step even when briefings
// exist (scenario: no hosts, "Assembly" content authored)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn no_hosts_suppresses_the_department_step(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let assembly = seed_department(&pool, tenant.id, site.id, "Assembly").await;
    let content = seed_content(&pool, tenant.id, site.id, "en").await;
    DepartmentContentRepo::upsert(
        &pool,
        tenant.id,
        content.id,
        assembly.id,
        &UpsertDepartmentContent {
            body_text: "Hearing protection required.".to_string(),
            document_ids: vec![],
        },
    )
    .await
    .unwrap();

    let visit = seed_visit(&pool, tenant.id, site.id).await;
    seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    assert!(!steps_of(&handle).contains(&"department".to_string()));
}

// ---------------------------------------------------------------------------
// Test: a host with zero department assignments expands to all active
// departments of the site
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unrestricted_host_expands_to_all_departments(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let assembly = seed_department(&pool, tenant.id, site.id, "Assembly").await;
    let content = seed_content(&pool, tenant.id, site.id, "en").await;
    DepartmentContentRepo::upsert(
        &pool,
        tenant.id,
        content.id,
        assembly.id,
        &UpsertDepartmentContent {
            body_text: "Hearing protection required.".to_string(),
            document_ids: vec![],
        },
    )
    .await
    .unwrap();

    let host = seed_host(&pool, tenant.id, site.id, "Grace Hopper").await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    VisitRepo::set_hosts(&pool, visit.id, &[host.id]).await.unwrap();
    seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    assert!(steps_of(&handle).contains(&"department".to_string()));

    let departments = handle["content"]["departments"].as_array().unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0]["department_name"], "Assembly");
}

// ---------------------------------------------------------------------------
// Test: a recent prior completion skips the training, flags untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_prior_completion_skips_the_training(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let config_resp = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/tenants/{}/training-config", tenant.id),
        json!({ "skip_threshold_days": 365 }),
    )
    .await;
    assert_eq!(config_resp.status(), StatusCode::OK);

    // The same person completed the training 10 days ago on an earlier visit.
    let old_visit = seed_visit(&pool, tenant.id, site.id).await;
    let old_visitor = seed_visitor(
        &pool,
        tenant.id,
        old_visit.id,
        "Ada",
        "Lovelace",
        Some("ada@example.com"),
    )
    .await;
    sqlx::query(
        "UPDATE visitors SET training_status = 'completed', \
             training_completed_at = NOW() - INTERVAL '10 days', \
             training_version = 1 \
         WHERE id = $1",
    )
    .bind(old_visitor.id)
    .execute(&pool)
    .await
    .unwrap();

    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(
        &pool,
        tenant.id,
        visit.id,
        " ada ",
        "LOVELACE",
        Some("Ada@Example.com"),
    )
    .await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let state = &handle["visitors"][0];
    assert_eq!(state["training_status"], "skipped");
    assert_eq!(state["completed_steps"].as_array().unwrap().len(), 0);
    assert!(state["next_step"].is_null());

    let (skipped, video_done): (bool, bool) =
        sqlx::query_as("SELECT training_skipped, video_done FROM visitors WHERE id = $1")
            .bind(visitor.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(skipped);
    assert!(!video_done);
}

// ---------------------------------------------------------------------------
// Test: bumping the training version invalidates prior completions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn version_bump_invalidates_prior_completion(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/tenants/{}/training-config", tenant.id),
        json!({ "skip_threshold_days": 365 }),
    )
    .await;

    let old_visit = seed_visit(&pool, tenant.id, site.id).await;
    let old_visitor = seed_visitor(
        &pool,
        tenant.id,
        old_visit.id,
        "Ada",
        "Lovelace",
        Some("ada@example.com"),
    )
    .await;
    sqlx::query(
        "UPDATE visitors SET training_status = 'completed', \
             training_completed_at = NOW() - INTERVAL '10 days', \
             training_version = 1 \
         WHERE id = $1",
    )
    .bind(old_visitor.id)
    .execute(&pool)
    .await
    .unwrap();

    // Bump: the version-1 completion no longer counts.
    let bump = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/tenants/{}/training-config/bump-version", tenant.id),
    )
    .await;
    assert_eq!(bump.status(), StatusCode::OK);
    assert_eq!(body_json(bump).await["data"]["training_version"], 2);

    let visit = seed_visit(&pool, tenant.id, site.id).await;
    seed_visitor(
        &pool,
        tenant.id,
        visit.id,
        "Ada",
        "Lovelace",
        Some("ada@example.com"),
    )
    .await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    assert_eq!(handle["visitors"][0]["training_status"], "pending");
}

// ---------------------------------------------------------------------------
// Test: confirming every applicable step completes the training
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn confirming_all_steps_completes_the_training(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();
    assert_eq!(steps_of(&handle), vec!["video", "risks"]);

    let confirm_video = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/video/confirm", visitor.id),
    )
    .await;
    assert_eq!(confirm_video.status(), StatusCode::OK);
    let state = body_json(confirm_video).await["data"].clone();
    assert_eq!(state["training_status"], "in_progress");
    assert_eq!(state["next_step"], "risks");

    let confirm_risks = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/risks/confirm", visitor.id),
    )
    .await;
    assert_eq!(confirm_risks.status(), StatusCode::OK);
    let state = body_json(confirm_risks).await["data"].clone();
    assert_eq!(state["training_status"], "completed");
    assert!(state["next_step"].is_null());

    // The summary endpoint agrees, with applicability re-resolved.
    let summary = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/visitors/{}/training?language=en", visitor.id),
    )
    .await;
    assert_eq!(summary.status(), StatusCode::OK);
    let summary = body_json(summary).await["data"].clone();
    assert_eq!(summary["state"], "completed");
    assert_eq!(
        summary["completed_steps"].as_array().unwrap().len(),
        summary["applicable_steps"].as_array().unwrap().len()
    );
}

// ---------------------------------------------------------------------------
// Test: double-confirm of the same step is an idempotent no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn double_confirm_is_idempotent(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();
    let uri = format!(
        "/api/v1/flows/{key}/visitors/{}/steps/video/confirm",
        visitor.id
    );

    let first = post_empty(build_test_app(pool.clone()), &uri).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await["data"].clone();

    // Simulated network retry.
    let second = post_empty(build_test_app(pool.clone()), &uri).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await["data"].clone();

    assert_eq!(first, second);

    let started_at: (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT training_started_at FROM visitors WHERE id = $1")
            .bind(visitor.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(started_at.0.is_some());
}

// ---------------------------------------------------------------------------
// Test: the kiosk channel rejects out-of-order confirmation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_order_confirm_is_rejected_on_kiosk(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();

    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/risks/confirm", visitor.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_STEP");

    // Flow state unchanged.
    let (status,): (String,) =
        sqlx::query_as("SELECT training_status FROM visitors WHERE id = $1")
            .bind(visitor.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "pending");
}

// ---------------------------------------------------------------------------
// Test: a step outside the frozen catalog is rejected on every channel
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn step_outside_the_catalog_is_rejected(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "invitation", None).await;
    let key = handle["session_key"].as_str().unwrap();

    // No equipment content exists, so the step is not in the catalog.
    let response = post_empty(
        build_test_app(pool.clone()),
        &format!(
            "/api/v1/flows/{key}/visitors/{}/steps/equipment/confirm",
            visitor.id
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_STEP");
}

// ---------------------------------------------------------------------------
// Test: invitation channel confirms in any order and allows the skip
// escape
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn invitation_channel_allows_any_order_and_skip(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "invitation", None).await;
    let key = handle["session_key"].as_str().unwrap();

    // Out of catalog order, allowed under the free policy.
    let confirm = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/risks/confirm", visitor.id),
    )
    .await;
    assert_eq!(confirm.status(), StatusCode::OK);

    // Skip the rest of the training.
    let skip = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/skip", visitor.id),
    )
    .await;
    assert_eq!(skip.status(), StatusCode::OK);
    let state = body_json(skip).await["data"].clone();
    assert_eq!(state["training_status"], "skipped");

    let (skipped, risks_done): (bool, bool) =
        sqlx::query_as("SELECT training_skipped, risks_done FROM visitors WHERE id = $1")
            .bind(visitor.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(skipped);
    // Flags set before the skip survive.
    assert!(risks_done);

    // Confirming after the skip is a conflict.
    let confirm = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/video/confirm", visitor.id),
    )
    .await;
    assert_eq!(confirm.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: strict channels reject the skip escape
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn skip_is_rejected_on_strict_channels(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();

    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/skip", visitor.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "SKIP_NOT_ALLOWED");
}

// ---------------------------------------------------------------------------
// Test: a visitor outside the flow handle is rejected before mutation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_visitor_is_rejected(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let member = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    let outsider = seed_visitor(&pool, tenant.id, visit.id, "Alan", "Turing", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", Some(vec![member.id])).await;
    let key = handle["session_key"].as_str().unwrap();

    let response = post_empty(
        build_test_app(pool.clone()),
        &format!(
            "/api/v1/flows/{key}/visitors/{}/steps/video/confirm",
            outsider.id
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_VISITOR");

    let (video_done,): (bool,) =
        sqlx::query_as("SELECT video_done FROM visitors WHERE id = $1")
            .bind(outsider.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!video_done);
}

// ---------------------------------------------------------------------------
// Test: the portal channel carries exactly one visitor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn portal_requires_exactly_one_visitor(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_visitor(&pool, tenant.id, visit.id, "Alan", "Turing", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/flows",
        json!({ "visit_id": visit.id, "channel": "portal", "language": "en" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: zero applicable steps moves pending visitors to not_available
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn no_content_moves_visitors_to_not_available(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    assert!(steps_of(&handle).is_empty());
    assert_eq!(handle["visitors"][0]["training_status"], "not_available");
}

// ---------------------------------------------------------------------------
// Test: unknown session key yields 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_session_key_is_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/flows/nosuchsessionkey").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: step labels use tenant translation overrides with defaults as
// fallback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn step_labels_use_tenant_overrides(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    TranslationRepo::set(&pool, tenant.id, "en", "training.step.video", "Welcome film")
        .await
        .unwrap();

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let steps = handle["steps"].as_array().unwrap();
    assert_eq!(steps[0]["step"], "video");
    assert_eq!(steps[0]["label"], "Welcome film");
    // No override for risks: default label.
    assert_eq!(steps[1]["label"], "General risk briefing");
}

// ---------------------------------------------------------------------------
// Test: the current-step endpoint follows progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_step_follows_progress(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();
    let uri = format!("/api/v1/flows/{key}/visitors/{}/current-step", visitor.id);

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(body_json(response).await["data"]["current_step"], "video");

    post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/video/confirm", visitor.id),
    )
    .await;

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(body_json(response).await["data"]["current_step"], "risks");

    // Re-reading the handle shows fresh visitor state with frozen steps.
    let reread = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}"),
    )
    .await;
    assert_eq!(reread.status(), StatusCode::OK);
    let reread = body_json(reread).await["data"].clone();
    assert_eq!(steps_of(&reread), vec!["video", "risks"]);
    assert_eq!(reread["visitors"][0]["training_status"], "in_progress");
}

// ---------------------------------------------------------------------------
// Test: one kiosk session carries several visitors with independent flags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn kiosk_batch_tracks_visitors_independently(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let ada = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    let alan = seed_visitor(&pool, tenant.id, visit.id, "Alan", "Turing", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();
    assert_eq!(handle["visitors"].as_array().unwrap().len(), 2);
    assert_eq!(steps_of(&handle), vec!["video", "risks"]);

    // Interleaved progress on the shared device session.
    let confirm = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/video/confirm", ada.id),
    )
    .await;
    assert_eq!(confirm.status(), StatusCode::OK);

    let confirm = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/video/confirm", alan.id),
    )
    .await;
    assert_eq!(confirm.status(), StatusCode::OK);

    let confirm = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/flows/{key}/visitors/{}/steps/risks/confirm", ada.id),
    )
    .await;
    assert_eq!(confirm.status(), StatusCode::OK);

    // Ordering is enforced per visitor: the first visitor finishing does
    // not unlock a later step for the second.
    let reread = get(build_test_app(pool.clone()), &format!("/api/v1/flows/{key}")).await;
    let reread = body_json(reread).await["data"].clone();
    assert_eq!(steps_of(&reread), vec!["video", "risks"]);

    let states = reread["visitors"].as_array().unwrap();
    let ada_state = states.iter().find(|v| v["visitor_id"] == ada.id).unwrap();
    let alan_state = states.iter().find(|v| v["visitor_id"] == alan.id).unwrap();
    assert_eq!(ada_state["training_status"], "completed");
    assert!(ada_state["next_step"].is_null());
    assert_eq!(alan_state["training_status"], "in_progress");
    assert_eq!(alan_state["next_step"], "risks");
    assert_eq!(alan_state["completed_steps"], json!(["video"]));

    let (ada_risks, alan_risks): (bool, bool) = (
        sqlx::query_as::<_, (bool,)>("SELECT risks_done FROM visitors WHERE id = $1")
            .bind(ada.id)
            .fetch_one(&pool)
            .await
            .unwrap()
            .0,
        sqlx::query_as::<_, (bool,)>("SELECT risks_done FROM visitors WHERE id = $1")
            .bind(alan.id)
            .fetch_one(&pool)
            .await
            .unwrap()
            .0,
    );
    assert!(ada_risks);
    assert!(!alan_risks);
}

// ---------------------------------------------------------------------------
// Test: a corrupted stored training status surfaces as an error instead
// of being misreported as pending
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn corrupt_training_status_is_not_coerced(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let site = seed_site(&pool, tenant.id).await;
    let visit = seed_visit(&pool, tenant.id, site.id).await;
    let visitor = seed_visitor(&pool, tenant.id, visit.id, "Ada", "Lovelace", None).await;
    seed_content(&pool, tenant.id, site.id, "en").await;

    let handle = start_flow(&pool, visit.id, "kiosk", None).await;
    let key = handle["session_key"].as_str().unwrap();

    // Simulate a row written by a future schema revision.
    sqlx::query("ALTER TABLE visitors DROP CONSTRAINT ck_visitors_training_status")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE visitors SET training_status = 'quarantined' WHERE id = $1")
        .bind(visitor.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/flows/{key}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
