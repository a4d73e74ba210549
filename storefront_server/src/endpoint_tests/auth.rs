use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;
use storefront_engine::{
    db_types::{Role, UserAccount},
    helpers::hash_secret,
    AuthApiError,
};

use super::helpers::{account, bearer, get_auth_config, send_json_request, valid_token, Backends};
use crate::auth::TokenIssuer;

fn account_with_secrets(id: i64, email: &str, password: &str, answer: &str) -> UserAccount {
    UserAccount {
        email: email.to_string(),
        password_hash: hash_secret(password).unwrap(),
        answer_hash: hash_secret(answer).unwrap(),
        ..account(id, Role::User)
    }
}

fn registration() -> serde_json::Value {
    json!({
        "name": "Test User",
        "email": "cs4218@test.com",
        "password": "cs4218@test.com",
        "phone": "81234567",
        "address": "1 Computing Drive",
        "answer": "football",
    })
}

#[actix_web::test]
async fn register_creates_a_standard_account() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_email().returning(|_| Ok(None));
    backends
        .auth
        .expect_create_account()
        .withf(|a| {
            a.role == Role::User &&
                a.email == "cs4218@test.com" &&
                a.password_hash.starts_with("$argon2") &&
                a.answer_hash.starts_with("$argon2")
        })
        .times(1)
        .returning(|a| Ok(UserAccount { email: a.email, name: a.name, ..account(7, Role::User) }));
    let req = TestRequest::post().uri("/api/v1/auth/register").set_json(registration()).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], 7);
    assert_eq!(body["user"]["role"], 0);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn register_rejects_duplicate_email() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_email().returning(|_| Ok(Some(account(3, Role::User))));
    backends.auth.expect_create_account().never();
    let req = TestRequest::post().uri("/api/v1/auth/register").set_json(registration()).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn register_reports_the_missing_field() {
    let mut backends = Backends::new();
    backends.auth.expect_create_account().never();
    let mut form = registration();
    form["phone"] = json!("");
    let req = TestRequest::post().uri("/api/v1/auth/register").set_json(form).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Phone number is required");
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let (status, body) = send_json_request(Backends::new(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request");
}

#[actix_web::test]
async fn login_issues_a_token_for_the_account() {
    let mut backends = Backends::new();
    backends
        .auth
        .expect_fetch_account_by_email()
        .withf(|email| email == "cs4218@test.com")
        .returning(|_| Ok(Some(account_with_secrets(4, "cs4218@test.com", "cs4218@test.com", "football"))));
    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "cs4218@test.com", "password": "cs4218@test.com" }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successfully");
    assert_eq!(body["user"]["email"], "cs4218@test.com");
    assert!(body["user"].get("password").is_none());
    let token = body["token"].as_str().expect("token should be a string");
    let claims = TokenIssuer::new(&get_auth_config()).decode(token).unwrap();
    assert_eq!(claims.sub, "4");
    assert_eq!(claims.account_id().unwrap(), 4);
    assert_eq!(claims.role, Some(Role::User));
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let mut backends = Backends::new();
    backends
        .auth
        .expect_fetch_account_by_email()
        .returning(|_| Ok(Some(account_with_secrets(4, "cs4218@test.com", "cs4218@test.com", "football"))));
    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "cs4218@test.com", "password": "guess" }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "message": "Invalid Password" }));
}

#[actix_web::test]
async fn login_with_unknown_email() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_email().returning(|_| Ok(None));
    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "nobody@test.com", "password": "whatever" }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn forgot_password_with_the_right_answer() {
    let mut backends = Backends::new();
    backends
        .auth
        .expect_fetch_account_by_email()
        .returning(|_| Ok(Some(account_with_secrets(4, "cs4218@test.com", "old-password", "football"))));
    backends
        .auth
        .expect_update_password()
        .withf(|id, hash| *id == 4 && hash.starts_with("$argon2"))
        .times(1)
        .returning(|_, _| Ok(()));
    let req = TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({ "email": "cs4218@test.com", "answer": "football", "newPassword": "new-password" }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Password reset successfully" }));
}

#[actix_web::test]
async fn forgot_password_with_the_wrong_answer() {
    let mut backends = Backends::new();
    backends
        .auth
        .expect_fetch_account_by_email()
        .returning(|_| Ok(Some(account_with_secrets(4, "cs4218@test.com", "old-password", "football"))));
    backends.auth.expect_update_password().never();
    let req = TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({ "email": "cs4218@test.com", "answer": "tennis", "newPassword": "new-password" }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn profile_update_applies_to_the_signed_in_account() {
    let mut backends = Backends::new().with_account(account(6, Role::User));
    backends
        .auth
        .expect_update_profile()
        .withf(|id, update| {
            *id == 6 &&
                update.name.as_deref() == Some("New Name") &&
                update.address.is_none() &&
                update.password_hash.is_none()
        })
        .times(1)
        .returning(|id, update| Ok(Some(UserAccount { name: update.name.unwrap_or_default(), ..account(id, Role::User) })));
    let req = TestRequest::put()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&valid_token(6, Role::User)))
        .set_json(json!({ "name": "New Name", "address": "   " }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedUser"]["name"], "New Name");
    assert_eq!(body["updatedUser"]["id"], 6);
}

#[actix_web::test]
async fn empty_profile_update_is_rejected() {
    let mut backends = Backends::new().with_account(account(6, Role::User));
    backends.auth.expect_update_profile().never();
    let req = TestRequest::put()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&valid_token(6, Role::User)))
        .set_json(json!({ "name": "" }))
        .to_request();
    let (status, _) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn protected_test_route_is_admin_only() {
    let backends = Backends::new().with_account(account(1, Role::Admin));
    let req =
        TestRequest::get().uri("/api/v1/auth/test").insert_header(bearer(&valid_token(1, Role::Admin))).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Protected Routes");
}

#[actix_web::test]
async fn registration_failure_in_the_database_is_hidden() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_email().returning(|_| Ok(None));
    backends
        .auth
        .expect_create_account()
        .returning(|_| Err(AuthApiError::DatabaseError("UNIQUE constraint failed: users.email".into())));
    let req = TestRequest::post().uri("/api/v1/auth/register").set_json(registration()).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("UNIQUE"));
}
