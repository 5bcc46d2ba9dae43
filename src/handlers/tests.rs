//! # Tests for Handlers
//!
//! Router-level tests against an in-memory SQLite database seeded with the
//! fixture agents.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::models::{Lead, lead};
use crate::render::Templates;
use crate::resolver::SlugStrategy;
use crate::seeds::{SeedPolicy, seed_agents};
use crate::server::{AppState, create_app};

const COMPLIANCE: &str = "<h1>{{BRAND_NAME}}</h1><p>{{AGENT_NAME}}</p>\
    <input type=\"hidden\" name=\"agent_handle\" value=\"{{AGENT_HANDLE}}\">";
const DIRECTORY: &str = "<input value=\"{{SEARCH_QUERY}}\"><h2>{{RESULTS_HEADER}}</h2>\
    {{AGENT_CARDS}}{{NO_RESULTS}}";

async fn setup_test_app(strategy: SlugStrategy) -> (Router, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    seed_agents(&db, SeedPolicy::IfEmpty).await.unwrap();

    let config = AppConfig {
        slug_strategy: strategy,
        ..Default::default()
    };
    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        templates: Arc::new(Templates::new(COMPLIANCE, DIRECTORY)),
    };

    (create_app(state), db)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn submit_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submit")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_meet_renders_seeded_agent() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/meet/jay-bloom").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Quility Switchboard Funnel"));
    assert!(body.contains("Jay Bloom"));
    assert!(body.contains("value=\"jay-bloom\""));
    assert!(!body.contains("{{BRAND_NAME}}"));
}

#[tokio::test]
async fn test_meet_unknown_agent_is_404() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/meet/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Agent not found");
}

#[tokio::test]
async fn test_meet_query_overrides_path() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/meet/does-not-exist?agent=gavin-morel").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gavin Morel"));
}

#[tokio::test]
async fn test_sms_compliance_uses_query() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/sms-compliance?agent=jay-bloom").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Jay Bloom"));

    let (status, _) = get(&app, "/sms-compliance").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_host_strategy_reads_subdomain() {
    let (app, _db) = setup_test_app(SlugStrategy::Host).await;

    let request = Request::builder()
        .method("GET")
        .uri("/sms-compliance")
        .header(header::HOST, "gavin-morel.links-insure.com:3005")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gavin Morel"));
}

#[tokio::test]
async fn test_directory_lists_all_agents() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("All Agents"));
    assert!(body.contains("/meet/jay-bloom"));
    assert!(body.contains("/meet/gavin-morel"));
    assert!(!body.contains("No agents found."));
}

#[tokio::test]
async fn test_directory_search_filters_by_city() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/?q=Austin").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Search Results for \"Austin\""));
    assert!(body.contains("/meet/jay-bloom"));
    assert!(!body.contains("/meet/gavin-morel"));
}

#[tokio::test]
async fn test_directory_no_results_escapes_query() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/?q=%3Cscript%3E").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No agents found."));
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>"));
}

#[tokio::test]
async fn test_submit_without_handle_is_rejected() {
    let (app, db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = send(&app, submit_request("first_name=Ann&email=ann%40example.com")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing required fields.");
    assert_eq!(Lead::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_submit_without_form_content_type_is_400() {
    let (app, db) = setup_test_app(SlugStrategy::Path).await;

    let request = Request::builder()
        .method("POST")
        .uri("/submit")
        .body(Body::from("agent_handle=jay-bloom&first_name=Ann"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing required fields.");
    assert_eq!(Lead::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_submit_with_repeated_checkbox_is_400() {
    let (app, db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = send(
        &app,
        submit_request("agent_handle=jay-bloom&sms_marketing=on&sms_marketing=on"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing required fields.");
    assert_eq!(Lead::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_submit_persists_lead_and_redirects() {
    let (app, db) = setup_test_app(SlugStrategy::Path).await;

    let response = app
        .clone()
        .oneshot(submit_request(
            "agent_handle=jay-bloom&first_name=Ann&last_name=Lee&email=ann%40example.com\
             &phone=555-0100&interest=Term+life&sms_transactional=on",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/thank-you/jay-bloom"
    );

    let leads: Vec<lead::Model> = Lead::find().all(&db).await.unwrap();
    assert_eq!(leads.len(), 1);
    let saved = &leads[0];
    assert_eq!(saved.agent_handle, "jay-bloom");
    assert_eq!(saved.email.as_deref(), Some("ann@example.com"));
    assert_eq!(saved.interest.as_deref(), Some("Term life"));
    assert!(!saved.marketing_consent);
    assert!(saved.transactional_consent);
    assert!(saved.consent);
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert!(
        headers[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap()
            .contains("frame-ancestors 'none'")
    );
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
    assert!(headers.get("x-powered-by").is_none());
    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let request = Request::builder()
        .uri("/meet/nobody")
        .header("x-request-id", "req-fixed-id")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "req-fixed-id");
}

#[tokio::test]
async fn test_readyz_reports_ready() {
    let (app, _db) = setup_test_app(SlugStrategy::Path).await;

    let (status, body) = get(&app, "/readyz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ready");
}
