//! In-process HTTP tests against the real router.
//!
//! Each test gets its own in-memory database; requests go through
//! `tower::ServiceExt::oneshot`, so the middleware stack, cookie handling,
//! and JSON shapes are all exercised exactly as a client would see them.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use fundtrack_api::{AppState, SessionSettings, create_router};
use fundtrack_db::SessionRepository;
use fundtrack_db::migration::{Migrator, MigratorTrait};
use fundtrack_shared::Role;
use fundtrack_shared::config::SessionConfig;

async fn setup() -> (Router, DatabaseConnection) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    let state = AppState {
        db: Arc::new(db.clone()),
        sessions: Arc::new(SessionSettings::from_config(&SessionConfig::default())),
    };
    (create_router(state), db)
}

/// Sends a request, returning the status, parsed JSON body (or `Null`), and
/// the raw `Set-Cookie` header if one was set.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .map(ToString::to_string);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value, set_cookie)
}

async fn register(app: &Router, username: &str, role: &str) {
    let (status, body, _) = send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": username, "password": "pw-123456", "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

/// Logs in and returns the `name=value` cookie pair for later requests.
async fn login(app: &Router, username: &str) -> String {
    let (status, body, set_cookie) = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": "pw-123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let set_cookie = set_cookie.expect("Login should set a session cookie");
    set_cookie
        .split(';')
        .next()
        .expect("Cookie header should have a name=value pair")
        .to_string()
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup().await;
    let (status, body, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_validates_and_rejects_duplicates() {
    let (app, _db) = setup().await;

    register(&app, "field-office", "agency").await;

    let (status, body, _) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "field-office", "password": "other", "role": "donor" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username already exists");

    let (status, body, _) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "x", "password": "pw", "role": "auditor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _, _) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "  ", "password": "pw", "role": "donor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _db) = setup().await;
    register(&app, "ministry", "government").await;

    let (wrong_status, wrong_body, wrong_cookie) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "ministry", "password": "nope" })),
    )
    .await;
    let (unknown_status, unknown_body, unknown_cookie) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "nobody", "password": "pw-123456" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert!(wrong_cookie.is_none());
    assert!(unknown_cookie.is_none());
}

#[tokio::test]
async fn test_login_sets_http_only_cookie_and_returns_role() {
    let (app, _db) = setup().await;
    register(&app, "donor-fund", "donor").await;

    let (status, body, set_cookie) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "donor-fund", "password": "pw-123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "donor");

    let set_cookie = set_cookie.expect("Expected a session cookie");
    assert!(set_cookie.starts_with("fundtrack_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_api_routes_require_a_session() {
    let (app, _db) = setup().await;

    for uri in ["/api/projects", "/api/expenditures", "/api/dashboard"] {
        let (status, body, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "no session for {uri}");
        assert_eq!(body["error"], "unauthenticated");
    }

    // A cookie nobody issued is just as dead.
    let (status, _, _) = send(
        &app,
        "GET",
        "/api/projects",
        Some("fundtrack_session=forged-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let (app, db) = setup().await;
    register(&app, "agency-hq", "agency").await;

    // Issue a token that was already dead on arrival.
    let repo = SessionRepository::new(db);
    let created = repo
        .create(1, Role::Agency, chrono::Duration::seconds(-1))
        .await
        .expect("Failed to create session");

    let cookie = format!("fundtrack_session={}", created.token);
    let (status, _, _) = send(&app, "GET", "/api/projects", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_project_mutation_is_agency_only() {
    let (app, _db) = setup().await;
    register(&app, "agency-hq", "agency").await;
    register(&app, "donor-fund", "donor").await;

    let donor_cookie = login(&app, "donor-fund").await;
    let (status, body, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&donor_cookie),
        Some(json!({ "name": "Well Rehab", "description": "", "status": "Planning" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    // The same call by an agency session succeeds with a server-assigned id.
    let agency_cookie = login(&app, "agency-hq").await;
    let (status, body, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&agency_cookie),
        Some(json!({ "name": "Well Rehab", "description": "", "status": "Planning" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Planning");
    assert!(body["id"].is_i64());

    // Reads stay open to every role.
    let (status, body, _) = send(&app, "GET", "/api/projects", Some(&donor_cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_project_create_defaults_and_validation() {
    let (app, _db) = setup().await;
    register(&app, "agency-hq", "agency").await;
    let cookie = login(&app, "agency-hq").await;

    // Omitted status defaults to Planning.
    let (status, body, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&cookie),
        Some(json!({ "name": "Road Upgrade" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Planning");

    // Unknown status values are rejected, not stored.
    let (status, body, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&cookie),
        Some(json!({ "name": "Bad", "status": "Cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&cookie),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_project_update() {
    let (app, _db) = setup().await;
    register(&app, "agency-hq", "agency").await;
    let cookie = login(&app, "agency-hq").await;

    let (_, created, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&cookie),
        Some(json!({ "name": "Well Rehab" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body, _) = send(
        &app,
        "PUT",
        &format!("/api/projects/{id}"),
        Some(&cookie),
        Some(json!({ "status": "In Progress" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, listed, _) = send(&app, "GET", "/api/projects", Some(&cookie), None).await;
    assert_eq!(listed[0]["status"], "In Progress");
    assert_eq!(listed[0]["name"], "Well Rehab");

    // Status enum is re-validated on change.
    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/projects/{id}"),
        Some(&cookie),
        Some(json!({ "status": "Paused" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        "PUT",
        "/api/projects/4040",
        Some(&cookie),
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expenditure_flow() {
    let (app, _db) = setup().await;
    register(&app, "agency-hq", "agency").await;
    let cookie = login(&app, "agency-hq").await;

    let (_, project, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&cookie),
        Some(json!({ "name": "Well Rehab" })),
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    // "150.5" is stored and listed as "150.50".
    let (status, body, _) = send(
        &app,
        "POST",
        "/api/expenditures",
        Some(&cookie),
        Some(json!({
            "project_id": project_id,
            "category": "Labor",
            "amount": "150.5",
            "date": "2024-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], "150.50");
    assert_eq!(body["project_name"], "Well Rehab");

    let (status, listed, _) = send(&app, "GET", "/api/expenditures", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["amount"], "150.50");
    assert_eq!(listed[0]["project_name"], "Well Rehab");

    // A project id nobody issued fails distinctly and inserts nothing.
    let (status, body, _) = send(
        &app,
        "POST",
        "/api/expenditures",
        Some(&cookie),
        Some(json!({
            "project_id": 999,
            "category": "Labor",
            "amount": "10.00",
            "date": "2024-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_project");

    // Negative and over-precise amounts are rejected.
    for bad_amount in ["-5", "1.505", "abc"] {
        let (status, body, _) = send(
            &app,
            "POST",
            "/api/expenditures",
            Some(&cookie),
            Some(json!({
                "project_id": project_id,
                "category": "Labor",
                "amount": bad_amount,
                "date": "2024-01-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {bad_amount}");
        assert_eq!(body["error"], "validation_error");
    }

    let (_, listed, _) = send(&app, "GET", "/api/expenditures", Some(&cookie), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboards_are_role_shaped() {
    let (app, _db) = setup().await;
    register(&app, "agency-hq", "agency").await;
    register(&app, "donor-fund", "donor").await;
    register(&app, "ministry", "government").await;
    let agency = login(&app, "agency-hq").await;

    let (_, wells, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(&agency),
        Some(json!({ "name": "Well Rehab", "status": "Planning" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/projects",
        Some(&agency),
        Some(json!({ "name": "Road Upgrade", "status": "In Progress" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/expenditures",
        Some(&agency),
        Some(json!({
            "project_id": wells["id"].as_i64().unwrap(),
            "category": "Labor",
            "amount": "150.50",
            "date": "2024-01-01"
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/expenditures",
        Some(&agency),
        Some(json!({
            "project_id": wells["id"].as_i64().unwrap(),
            "category": "Materials",
            "amount": "49.50",
            "date": "2024-01-02"
        })),
    )
    .await;

    let (status, body, _) = send(&app, "GET", "/api/dashboard", Some(&agency), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "agency");
    assert_eq!(body["view"]["project_count"], 2);
    assert_eq!(body["view"]["expenditures"].as_array().unwrap().len(), 2);

    let donor = login(&app, "donor-fund").await;
    let (_, body, _) = send(&app, "GET", "/api/dashboard", Some(&donor), None).await;
    assert_eq!(body["role"], "donor");
    assert_eq!(body["view"]["grand_total"], "200.00");
    let groups = body["view"]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["project_name"], "Well Rehab");
    assert_eq!(groups[0]["subtotal"], "200.00");

    let government = login(&app, "ministry").await;
    let (_, body, _) = send(&app, "GET", "/api/dashboard", Some(&government), None).await;
    assert_eq!(body["role"], "government");
    assert_eq!(body["view"]["summary"]["total"], 2);
    assert_eq!(body["view"]["summary"]["active"], 1);
    assert_eq!(body["view"]["summary"]["completed"], 0);
    let groups = body["view"]["groups"].as_array().unwrap();
    assert_eq!(groups[0]["status"], "Planning");
    assert_eq!(groups[0]["count"], 1);
}

#[tokio::test]
async fn test_logout_destroys_the_session() {
    let (app, _db) = setup().await;
    register(&app, "agency-hq", "agency").await;
    let cookie = login(&app, "agency-hq").await;

    // Session works before logout.
    let (status, _, _) = send(&app, "GET", "/api/projects", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, set_cookie) = send(&app, "GET", "/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    // The cookie is cleared on the way out.
    assert!(set_cookie.is_some());

    // The server-side session is gone; the old cookie is dead.
    let (status, _, _) = send(&app, "GET", "/api/projects", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logging out again without a live session is harmless.
    let (status, _, _) = send(&app, "GET", "/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
}
