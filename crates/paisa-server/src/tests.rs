//! Integration tests driving the router with in-memory databases.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use paisa_core::Database;

use crate::{handlers::hash_password, AppState, ServerConfig};

const DEV_EMAIL: &str = "dev@example.com";

/// App with auth disabled, acting as a pre-created dev user.
fn test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let hash = hash_password("password123").unwrap();
    db.create_user("Dev User", DEV_EMAIL, &hash).unwrap();

    let config = ServerConfig {
        require_auth: false,
        dev_user: Some(DEV_EMAIL.to_string()),
        ..Default::default()
    };
    let app = crate::create_router(AppState::new(db.clone(), config));
    (app, db)
}

/// App with auth enabled and a known signing secret.
fn secured_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    };
    crate::create_router(AppState::new(db, config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn sample_expense(description: &str, amount: &str, category: &str, date: &str) -> Value {
    json!({
        "description": description,
        "amount": amount,
        "category": category,
        "date": date,
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = test_app();
    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_signup_and_login() {
    let app = secured_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({ "name": "Asha", "email": "asha@example.com", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "asha@example.com");
    // hashes never leave the API
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "asha@example.com", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "asha@example.com", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = secured_app();
    let req = json!({ "name": "Asha", "email": "asha@example.com", "password": "secret123" });

    let (status, _) = send(&app, json_request("POST", "/api/auth/signup", req.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, json_request("POST", "/api/auth/signup", req)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_expense_routes_require_token() {
    let app = secured_app();

    let (status, _) = send(&app, get_request("/api/expenses")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({ "name": "Asha", "email": "asha@example.com", "password": "secret123" }),
        ),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let request = Request::builder()
        .uri("/api/expenses")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_expense_crud() {
    let (app, _db) = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("Mess lunch", "85.50", "Food & Snacks", "2025-03-10"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["expense"]["id"].as_i64().unwrap();
    assert_eq!(body["expense"]["amount"], "85.50");
    assert_eq!(body["expense"]["payment_mode"], "UPI");

    let (status, body) = send(&app, get_request("/api/expenses")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/expenses/{id}"),
            json!({ "amount": "90.00" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expense"]["amount"], "90.00");
    assert_eq!(body["expense"]["description"], "Mess lunch");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/expenses/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get_request(&format!("/api/expenses/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_expense_validation() {
    let (app, _db) = test_app();

    // description too short
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("ab", "50", "Transport", "2025-03-10"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // zero amount
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("Bus pass", "0", "Transport", "2025-03-10"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unknown category is rejected at deserialization
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("Groceries", "50", "Groceries", "2025-03-10"),
        ),
    )
    .await;
    assert_ne!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _db) = test_app();

    for (desc, amount, category, date) in [
        ("Mess lunch", "100", "Food & Snacks", "2025-03-05"),
        ("Snacks", "50", "Food & Snacks", "2025-03-12"),
        ("Bus pass", "60", "Transport", "2025-03-07"),
        ("Old movie", "200", "Entertainment", "2025-02-20"),
    ] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/expenses",
                sample_expense(desc, amount, category, date),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get_request("/api/expenses/stats?month=3&year=2025")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["grand_total"], "210");
    assert_eq!(body["stats"]["category_totals"][0]["category"], "Food & Snacks");
    assert_eq!(body["stats"]["category_totals"][0]["count"], 2);

    // no period aggregates everything
    let (status, body) = send(&app, get_request("/api/expenses/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["grand_total"], "410");

    // month without year is rejected
    let (status, _) = send(&app, get_request("/api/expenses/stats?month=3")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_suggestions_endpoint() {
    let (app, _db) = test_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("Canteen runs", "6000", "Food & Snacks", "2025-03-15"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        get_request("/api/expenses/suggestions?month=3&year=2025"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], 3);
    assert_eq!(body["report"]["total_expenses"], "6000");
    assert_eq!(body["report"]["recommended_budget"], "8000");

    let suggestions = body["report"]["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    // high-priority tip sorts above the medium warning
    assert_eq!(suggestions[0]["kind"], "tip");
    assert_eq!(suggestions[0]["priority"], "high");
    assert_eq!(suggestions[1]["kind"], "warning");
    assert_eq!(suggestions[1]["priority"], "medium");
}

#[tokio::test]
async fn test_report_endpoint() {
    let (app, _db) = test_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("Mess lunch", "120", "Food & Snacks", "2025-03-05"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request("/api/expenses/report?month=3&year=2025"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("expense-report-march-2025.txt"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Expense Report - March 2025"));
    assert!(text.contains("Mess lunch"));
}

#[tokio::test]
async fn test_export_endpoint() {
    let (app, _db) = test_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            sample_expense("Mess lunch", "85.50", "Food & Snacks", "2025-03-05"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request("/api/expenses/export?month=3&year=2025"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("date,category,description,amount,payment_mode,notes"));
    assert!(csv.contains("85.50"));

    let (status, _) = send(&app, get_request("/api/expenses/export?format=xml")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
