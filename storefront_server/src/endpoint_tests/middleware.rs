use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use actix_web::{http::StatusCode, test::TestRequest};
use chrono::Duration;
use serde_json::json;
use storefront_engine::{db_types::Role, AuthApiError};

use super::helpers::{account, bearer, issue_token, send_json_request, valid_token, Backends};
use crate::{auth::TokenIssuer, config::AuthConfig};

#[actix_web::test]
async fn missing_token_is_rejected_before_the_handler() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_id().never();
    backends.orders.expect_fetch_orders_for_buyer().never();
    let req = TestRequest::get().uri("/api/v1/auth/orders").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "message": "Unauthorized: No token provided" }));
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_id().never();
    let req = TestRequest::get().uri("/api/v1/auth/user-auth").insert_header(bearer("not-a-jwt")).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: Invalid or expired token");
}

#[actix_web::test]
async fn expired_token_is_rejected_even_for_admins() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_id().never();
    let token = issue_token(1, Some(Role::Admin), Duration::days(-1));
    let req = TestRequest::get().uri("/api/v1/auth/admin-auth").insert_header(bearer(&token)).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: Invalid or expired token");
}

#[actix_web::test]
async fn token_from_another_server_is_rejected() {
    let mut backends = Backends::new();
    backends.auth.expect_fetch_account_by_id().never();
    let other = TokenIssuer::new(&AuthConfig::new("a-completely-different-secret-value", Duration::days(7)));
    let token = other.issue_token(1, Some(Role::Admin)).unwrap();
    let req = TestRequest::get().uri("/api/v1/auth/user-auth").insert_header(bearer(&token)).to_request();
    let (status, _) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_for_deleted_account_is_rejected() {
    let backends = Backends::new().without_account(99);
    let token = valid_token(99, Role::User);
    let req = TestRequest::get().uri("/api/v1/auth/user-auth").insert_header(bearer(&token)).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: No user found");
}

#[actix_web::test]
async fn raw_and_bearer_tokens_are_accepted() {
    let token = valid_token(5, Role::User);
    for header in [token.clone(), format!("Bearer {token}")] {
        let backends = Backends::new().with_account(account(5, Role::User));
        let req = TestRequest::get().uri("/api/v1/auth/user-auth").insert_header(("Authorization", header)).to_request();
        let (status, body) = send_json_request(backends, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }
}

#[actix_web::test]
async fn standard_user_cannot_use_admin_routes() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.accounts.expect_fetch_all_accounts().never();
    let token = valid_token(5, Role::User);
    let req = TestRequest::get().uri("/api/v1/auth/admin-auth").insert_header(bearer(&token)).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "success": false, "message": "Forbidden: Admin Access Required" }));
}

#[actix_web::test]
async fn role_in_token_is_not_trusted() {
    // The token still claims admin, but the account has since been demoted
    let mut backends = Backends::new().with_account(account(3, Role::User));
    backends.accounts.expect_fetch_all_accounts().never();
    let token = valid_token(3, Role::Admin);
    let req = TestRequest::get().uri("/api/v1/auth/users").insert_header(bearer(&token)).to_request();
    let (status, _) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admin_reaches_the_handler_exactly_once() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.accounts.expect_fetch_all_accounts().times(1).returning(|| Ok(vec![account(1, Role::Admin)]));
    let token = valid_token(1, Role::Admin);
    let req = TestRequest::get().uri("/api/v1/auth/users").insert_header(bearer(&token)).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["role"], 1);
    assert!(body[0].get("password_hash").is_none());
}

#[actix_web::test]
async fn role_lookup_failure_fails_closed() {
    let mut backends = Backends::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    // The sign-in check finds the account; the role check then hits a database error
    backends.auth.expect_fetch_account_by_id().returning(move |id| match counter.fetch_add(1, Ordering::SeqCst) {
        0 => Ok(Some(account(id, Role::Admin))),
        _ => Err(AuthApiError::DatabaseError("database is locked".into())),
    });
    backends.accounts.expect_fetch_all_accounts().never();
    let token = valid_token(1, Role::Admin);
    let req = TestRequest::get().uri("/api/v1/auth/users").insert_header(bearer(&token)).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "message": "Error in admin middleware" }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn database_error_during_sign_in_is_not_leaked() {
    let mut backends = Backends::new();
    backends
        .auth
        .expect_fetch_account_by_id()
        .returning(|_| Err(AuthApiError::DatabaseError("no such table: users".into())));
    let token = valid_token(1, Role::User);
    let req = TestRequest::get().uri("/api/v1/auth/user-auth").insert_header(bearer(&token)).to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(!body.to_string().contains("no such table"));
}
