use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use axum_helpers::{JwtConfig, TokenService};
use domain_users::{InMemoryUserRepository, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn tokens() -> TokenService {
    TokenService::new(&JwtConfig::new("handler-test-secret-with-32-characters").unwrap())
}

fn app(tokens: TokenService) -> Router {
    let service = UserService::new(InMemoryUserRepository::new(), tokens)
        .with_admin_emails(["boss@shop.io"]);
    handlers::router(service)
}

fn signup_body(email: &str, password: &str) -> Value {
    json!({
        "name": "Marie",
        "surname": "Curie",
        "age": 66,
        "address": {
            "city": "Paris",
            "postalCode": "75005",
            "streetNumber": "11",
            "streetName": "Rue Pierre et Marie Curie"
        },
        "email": email,
        "password": password
    })
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_signup_returns_token_and_user_without_hash() {
    let tokens = tokens();
    let app = app(tokens.clone());

    let (status, body) = post_json(&app, "/signup", signup_body("marie@sorbonne.fr", "polonium")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "marie@sorbonne.fr");
    assert_eq!(body["user"]["isAdmin"], false);
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password").is_none());

    let claims = tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.user_id.to_string(), body["user"]["_id"].as_str().unwrap());
}

#[tokio::test]
async fn test_signup_twice_is_a_conflict() {
    let app = app(tokens());

    let (first, _) = post_json(&app, "/signup", signup_body("marie@sorbonne.fr", "polonium")).await;
    let (second, body) = post_json(&app, "/signup", signup_body("Marie@Sorbonne.fr", "radium!!")).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_short_password_is_rejected() {
    let app = app(tokens());

    let (status, body) = post_json(&app, "/signup", signup_body("marie@sorbonne.fr", "123456")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "password must be at least 7 characters long");
}

#[tokio::test]
async fn test_signup_missing_address_is_rejected() {
    let app = app(tokens());
    let mut body = signup_body("marie@sorbonne.fr", "polonium");
    body.as_object_mut().unwrap().remove("address");

    let (status, body) = post_json(&app, "/signup", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("address"));
}

#[tokio::test]
async fn test_admin_email_gets_admin_token() {
    let tokens = tokens();
    let app = app(tokens.clone());

    let (status, body) = post_json(&app, "/signup", signup_body("boss@shop.io", "polonium")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(tokens.verify(body["token"].as_str().unwrap()).unwrap().is_admin);
}

#[tokio::test]
async fn test_login_flow() {
    let tokens = tokens();
    let app = app(tokens.clone());
    post_json(&app, "/signup", signup_body("marie@sorbonne.fr", "polonium")).await;

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "marie@sorbonne.fr", "password": "polonium" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(tokens.verify(body["token"].as_str().unwrap()).is_ok());

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "marie@sorbonne.fr", "password": "radium!!" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "pierre@sorbonne.fr", "password": "polonium" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "EMAIL_NOT_FOUND");
}

#[tokio::test]
async fn test_signup_reports_first_failing_field_in_declared_order() {
    let app = app(tokens());
    let mut body = signup_body("marie@sorbonne.fr", "short");
    body["name"] = json!("");
    body["address"]["city"] = json!("");

    let (status, body) = post_json(&app, "/signup", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "name must not be empty");
}

#[tokio::test]
async fn test_signup_reports_address_before_password() {
    let app = app(tokens());
    let mut body = signup_body("marie@sorbonne.fr", "short");
    body["address"]["city"] = json!("");

    let (_, body) = post_json(&app, "/signup", body).await;

    assert_eq!(body["error"], "address.city must not be empty");
}
