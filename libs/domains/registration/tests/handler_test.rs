//! Handler tests for the registration domain
//!
//! These drive the form and JSON routers with an in-memory repository:
//! - Request decoding (form / JSON bodies)
//! - Status codes and response bodies
//! - What ends up in storage

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_registration::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(&HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

fn service(repo: &InMemoryUserRepository) -> RegistrationService<InMemoryUserRepository> {
    RegistrationService::new(repo.clone(), fast_hasher())
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn text_body(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_register_renders_form() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::form_router(service(&repo));

    let response = app
        .oneshot(Request::builder().uri("/register").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = text_body(response.into_body()).await;
    for field in ["name=\"username\"", "name=\"email\"", "name=\"password\""] {
        assert!(html.contains(field), "form is missing {}", field);
    }
    assert!(html.contains("type=\"submit\""));
}

#[tokio::test]
async fn test_form_post_registers_user() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::form_router(service(&repo));

    let response = app
        .oneshot(form_post("username=amy&email=amy%40x.com&password=secret123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        text_body(response.into_body()).await,
        "Record inserted successfully"
    );

    let record = repo.get_by_username("amy").await.unwrap();
    assert_eq!(record.email, "amy@x.com");
    assert_ne!(record.password_hash, "secret123");
    assert!(fast_hasher().verify("secret123", &record.password_hash).unwrap());
}

#[tokio::test]
async fn test_form_post_lists_every_empty_field() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::form_router(service(&repo));

    let response = app
        .oneshot(form_post("username=&email=&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text_body(response.into_body()).await,
        "Username must not be empty\nEmail must not be empty\nPassword must not be empty"
    );
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_form_post_missing_fields_count_as_empty() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::form_router(service(&repo));

    let response = app.oneshot(form_post("username=amy")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text_body(response.into_body()).await,
        "Email must not be empty\nPassword must not be empty"
    );
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_form_post_duplicate_username_is_generic_failure() {
    let repo = InMemoryUserRepository::new();
    repo.insert_user("amy", "amy@x.com", "original-hash")
        .await
        .unwrap();
    let app = handlers::form_router(service(&repo));

    let response = app
        .oneshot(form_post("username=amy&email=other%40x.com&password=secret123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text_body(response.into_body()).await, "Internal server error");

    let record = repo.get_by_username("amy").await.unwrap();
    assert_eq!(record.email, "amy@x.com");
    assert_eq!(record.password_hash, "original-hash");
}

#[tokio::test]
async fn test_form_post_wrong_content_type_is_rejected() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::form_router(service(&repo));

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("username=amy"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json: Value = json_body(response.into_body()).await;
    assert_eq!(json["error"], "FORM_EXTRACTION");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_api_register_returns_201() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::api_router(service(&repo));

    let response = app
        .oneshot(json_post(json!({
            "username": "amy",
            "email": "amy@x.com",
            "password": "secret123"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let confirmation: Confirmation = json_body(response.into_body()).await;
    assert_eq!(confirmation.username, "amy");
    assert_eq!(confirmation.message, "Record inserted successfully");

    let record = repo.get_by_username("amy").await.unwrap();
    assert_eq!(record.id, confirmation.id);
}

#[tokio::test]
async fn test_api_register_validation_details() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::api_router(service(&repo));

    let response = app
        .oneshot(json_post(json!({
            "username": "",
            "email": "",
            "password": ""
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"],
        json!([
            "Username must not be empty",
            "Email must not be empty",
            "Password must not be empty"
        ])
    );
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_api_register_duplicate_hides_cause() {
    let repo = InMemoryUserRepository::new();
    repo.insert_user("amy", "amy@x.com", "hash").await.unwrap();
    let app = handlers::api_router(service(&repo));

    let response = app
        .oneshot(json_post(json!({
            "username": "amy",
            "email": "amy@x.com",
            "password": "secret123"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Internal server error");
    assert!(!body.to_string().contains("amy"));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_api_register_malformed_json() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::api_router(service(&repo));

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}
