use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bragboard_api::db::DatabaseClient;
use bragboard_api::routes::create_routes;
use bragboard_api::seed::seed_demo_data;
use bragboard_api::{AppConfig, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const ALICE: &str = "alice@company.com"; // admin, id 1
const BOB: &str = "bob@company.com"; // employee, id 2
const CHARLIE: &str = "charlie@company.com"; // employee, id 3

/// Router over a fresh in-memory store holding the demo users and shoutout 1 (Alice -> Bob).
async fn test_app() -> Router {
    let state = AppState::with_database(AppConfig::default(), DatabaseClient::in_memory());
    seed_demo_data(&state).await.unwrap();
    create_routes(state)
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, method, uri, token, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Posts a body verbatim, for payloads `json!` cannot produce.
async fn post_text(app: &Router, uri: &str, token: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "bragboard" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {}: {}", email, body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn welcome_route_greets() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to BragBoard API" }));
}

#[tokio::test]
async fn health_reports_store() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "in_memory");
}

#[tokio::test]
async fn core_routes_are_mounted() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::GET, "/shoutouts/", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::POST, "/auth/login", None, Some(json!({ "email": ALICE, "password": "bragboard" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/shoutouts/", None, Some(json!({ "message": "hi", "recipient_ids": [2] }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, Method::DELETE, "/admin/shoutouts/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/auth/login", None, Some(json!({ "email": ALICE, "password": "wrong-password" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, _) = send(&app, Method::POST, "/auth/login", None, Some(json!({ "email": "nobody@company.com", "password": "bragboard" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_token_unlocks_profile() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, body) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], BOB);
    assert_eq!(body["role"], "employee");
    assert!(body.get("password_hash").is_none());

    let (status, _) = send(&app, Method::GET, "/users", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn created_shoutout_leads_the_feed() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/shoutouts/",
        Some(&token),
        Some(json!({ "message": "Great demo, Charlie!", "recipient_ids": [3, 3] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["sender"]["id"], 2);
    assert_eq!(created["recipients"].as_array().unwrap().len(), 1);
    assert_eq!(created["comments_count"], 0);

    let (status, feed) = send(&app, Method::GET, "/shoutouts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["id"], created["id"]);
    assert_eq!(feed[1]["id"], 1);
}

#[tokio::test]
async fn shoutout_validation() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, _) = send(&app, Method::POST, "/shoutouts/", Some(&token), Some(json!({ "message": "   ", "recipient_ids": [3] }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::POST, "/shoutouts/", Some(&token), Some(json!({ "message": "hello", "recipient_ids": [] }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, Method::POST, "/shoutouts/", Some(&token), Some(json!({ "message": "hello", "recipient_ids": [42] }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn feed_filters_and_paging() {
    let app = test_app().await;
    let token = login(&app, CHARLIE).await;
    let (status, _) = send(&app, Method::POST, "/shoutouts/", Some(&token), Some(json!({ "message": "Thanks Diana", "recipient_ids": [4] }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, feed) = send(&app, Method::GET, "/shoutouts?department=Engineering", None, None).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["sender_id"], 1);

    let (_, feed) = send(&app, Method::GET, "/shoutouts?recipient_id=4", None, None).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);

    let (_, feed) = send(&app, Method::GET, "/shoutouts?sender_id=1", None, None).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["id"], 1);

    let (_, feed) = send(&app, Method::GET, "/shoutouts?sender_id=3", None, None).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["sender"]["name"], "Charlie Davis");

    let (_, feed) = send(&app, Method::GET, "/shoutouts?sender_id=2", None, None).await;
    assert!(feed.as_array().unwrap().is_empty());

    let (_, feed) = send(&app, Method::GET, "/shoutouts?query=MIGRATION", None, None).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);

    let (_, feed) = send(&app, Method::GET, "/shoutouts?limit=1&offset=1", None, None).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["id"], 1);

    let (status, _) = send(&app, Method::GET, "/shoutouts?limit=0", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = send(&app, Method::GET, "/shoutouts?offset=10001", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn admin_delete_requires_admin_and_existing_shoutout() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;
    let employee = login(&app, BOB).await;

    let (status, _) = send(&app, Method::DELETE, "/admin/shoutouts/1", Some(&employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, "/admin/shoutouts/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, Method::DELETE, "/admin/shoutouts/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/shoutouts/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, logs) = send(&app, Method::GET, "/admin/logs", Some(&admin), None).await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], "DELETED_SHOUTOUT");
    assert_eq!(logs[0]["target_id"], 1);
    assert_eq!(logs[0]["admin_name"], "Alice Smith");
}

#[tokio::test]
async fn reactions_toggle() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, reactions) = send(&app, Method::POST, "/shoutouts/1/reactions", Some(&token), Some(json!({ "type": "clap" }))).await;
    assert_eq!(status, StatusCode::OK);
    let reactions = reactions.as_array().unwrap();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0]["type"], "clap");
    assert_eq!(reactions[0]["user_id"], 2);

    let (_, shoutout) = send(&app, Method::GET, "/shoutouts/1", None, None).await;
    assert_eq!(shoutout["reactions"].as_array().unwrap().len(), 1);

    let (_, reactions) = send(&app, Method::POST, "/shoutouts/1/reactions", Some(&token), Some(json!({ "type": "clap" }))).await;
    assert!(reactions.as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::POST, "/shoutouts/1/reactions", Some(&token), Some(json!({ "type": "love" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/shoutouts/99/reactions", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_are_counted_and_moderated() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;
    let token = login(&app, CHARLIE).await;

    let (status, comment) = send(&app, Method::POST, "/shoutouts/1/comments", Some(&token), Some(json!({ "content": "Well deserved!" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["user"]["name"], "Charlie Davis");

    let (status, _) = send(&app, Method::POST, "/shoutouts/1/comments", Some(&token), Some(json!({ "content": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::POST, "/shoutouts/99/comments", Some(&token), Some(json!({ "content": "hi" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, shoutout) = send(&app, Method::GET, "/shoutouts/1", None, None).await;
    assert_eq!(shoutout["comments_count"], 1);

    let uri = format!("/admin/comments/{}", comment["id"]);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, comments) = send(&app, Method::GET, "/shoutouts/1/comments", None, None).await;
    assert!(comments.as_array().unwrap().is_empty());

    let (_, logs) = send(&app, Method::GET, "/admin/logs", Some(&admin), None).await;
    assert_eq!(logs[0]["action"], "DELETED_COMMENT");
    assert_eq!(logs[0]["target_type"], "comment");
}

#[tokio::test]
async fn reports_flow_through_moderation() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;
    let token = login(&app, BOB).await;

    let (status, report) = send(&app, Method::POST, "/shoutouts/1/report", Some(&token), Some(json!({ "reason": "Off topic" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["status"], "pending");
    assert_eq!(report["reported_by"], 2);

    let (status, _) = send(&app, Method::GET, "/admin/reports", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, pending) = send(&app, Method::GET, "/admin/reports", Some(&admin), None).await;
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["shoutout"]["id"], 1);
    assert_eq!(pending[0]["reason"], "Off topic");

    let uri = format!("/admin/reports/{}/resolve", report["id"]);
    let (status, resolved) = send(&app, Method::POST, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["status"], "resolved");

    let (_, pending) = send(&app, Method::GET, "/admin/reports", Some(&admin), None).await;
    assert!(pending.as_array().unwrap().is_empty());

    let (_, logs) = send(&app, Method::GET, "/admin/logs", Some(&admin), None).await;
    assert_eq!(logs[0]["action"], "RESOLVED_REPORT");
    assert_eq!(logs[0]["target_id"], 1);

    let (status, _) = send(&app, Method::POST, "/admin/reports/999/resolve", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_shoutout_drops_its_reports() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;
    let token = login(&app, BOB).await;

    send(&app, Method::POST, "/shoutouts/1/report", Some(&token), Some(json!({ "reason": "spam" }))).await;
    send(&app, Method::POST, "/shoutouts/1/comments", Some(&token), Some(json!({ "content": "thanks" }))).await;

    let (status, _) = send(&app, Method::DELETE, "/admin/shoutouts/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, pending) = send(&app, Method::GET, "/admin/reports", Some(&admin), None).await;
    assert!(pending.as_array().unwrap().is_empty());
    let (status, _) = send(&app, Method::GET, "/shoutouts/1/comments", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_and_leaderboard() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;

    let (status, stats) = send(&app, Method::GET, "/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalShoutouts"], 1);
    assert_eq!(stats["totalActiveUsers"], 4);
    assert_eq!(stats["topContributors"][0], json!({ "name": "Alice Smith", "count": 1 }));
    assert_eq!(stats["mostTaggedUsers"][0], json!({ "name": "Bob Johnson", "count": 1 }));
    assert_eq!(stats["departmentEngagement"][0], json!({ "department": "Engineering", "count": 1 }));

    let (status, board) = send(&app, Method::GET, "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board[0]["name"], "Bob Johnson");
    assert_eq!(board[0]["points"], 15);
    assert_eq!(board[1]["name"], "Alice Smith");
    assert_eq!(board[1]["points"], 10);
}

#[tokio::test]
async fn metrics_export_is_csv_attachment() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;

    let (status, headers, body) = send_raw(&app, Method::GET, "/admin/export", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("bragboard_metrics_"));

    let csv = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Name,Department,Posts Sent,Points");
    assert_eq!(lines[1], "Alice Smith,Engineering,1,10");
    assert_eq!(lines[2], "Bob Johnson,Sales,0,15");
    assert_eq!(lines.len(), 5);
}

#[tokio::test]
async fn registration_creates_employees() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "name": "Eve Adams", "email": "Eve@Company.com", "password": "secret1", "department": "Design" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["role"], "employee");
    assert_eq!(body["user"]["email"], "eve@company.com");
    assert!(body["token"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "name": "Eve Again", "email": "eve@company.com", "password": "secret1", "department": "Design" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "name": "Short", "email": "short@company.com", "password": "123", "department": "Design" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn role_changes_apply_to_existing_tokens() {
    let app = test_app().await;
    let admin = login(&app, ALICE).await;
    let bob = login(&app, BOB).await;

    let (status, _) = send(&app, Method::PUT, "/users/2", Some(&bob), Some(json!({ "role": "admin" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::PUT, "/users/3", Some(&bob), Some(json!({ "name": "Hacked" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::PUT, "/users/2", Some(&bob), Some(json!({ "department": "Marketing" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Marketing");

    let (status, body) = send(&app, Method::PUT, "/users/2", Some(&admin), Some(json!({ "role": "admin" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let (status, _) = send(&app, Method::GET, "/admin/stats", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_input_gets_json_errors() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, body) = post_text(&app, "/shoutouts/1/comments", &token, r#"{"content": "#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, body) = post_text(&app, "/shoutouts/1/reactions", &token, r#"{"kind": "clap"}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);

    let (status, body) = send(&app, Method::GET, "/shoutouts/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, body) = send(&app, Method::GET, "/shoutouts?limit=lots", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn text_limits_are_inclusive() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let shoutout = |message: String| json!({ "message": message, "recipient_ids": [3] });
    let (status, _) = send(&app, Method::POST, "/shoutouts/", Some(&token), Some(shoutout("m".repeat(2000)))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/shoutouts/", Some(&token), Some(shoutout("m".repeat(2001)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let comment = |content: String| json!({ "content": content });
    let (status, _) = send(&app, Method::POST, "/shoutouts/1/comments", Some(&token), Some(comment("c".repeat(1000)))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/shoutouts/1/comments", Some(&token), Some(comment("c".repeat(1001)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let report = |reason: String| json!({ "reason": reason });
    let (status, _) = send(&app, Method::POST, "/shoutouts/1/report", Some(&token), Some(report("r".repeat(500)))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/shoutouts/1/report", Some(&token), Some(report("r".repeat(501)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn image_url_must_be_http() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/shoutouts/",
        Some(&token),
        Some(json!({ "message": "Nice slides", "recipient_ids": [3], "image_url": "ftp://x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("image_url"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/shoutouts/",
        Some(&token),
        Some(json!({ "message": "Nice slides", "recipient_ids": [3], "image_url": "https://img.company.com/a.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["image_url"], "https://img.company.com/a.png");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = test_app().await;
    let token = login(&app, BOB).await;

    let (status, body) = send(&app, Method::GET, "/users/99", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, body) = send(&app, Method::GET, "/users/3", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Charlie Davis");
}
