use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;
use storefront_engine::{
    db_types::{OrderStatusType, Price, Role},
    ClientToken,
    OrderFlowError,
    PaymentGatewayError,
    SaleResult,
};

use super::helpers::{account, bearer, order, product, send_json_request, valid_token, Backends};

fn checkout_request(token: &str, body: serde_json::Value) -> actix_http::Request {
    TestRequest::post().uri("/api/v1/product/braintree/payment").insert_header(bearer(token)).set_json(body).to_request()
}

#[actix_web::test]
async fn client_token_is_public() {
    let mut backends = Backends::new();
    backends
        .gateway
        .expect_generate_client_token()
        .times(1)
        .returning(|| Ok(ClientToken { client_token: "sandbox-client-token".into() }));
    let req = TestRequest::get().uri("/api/v1/product/braintree/token").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "clientToken": "sandbox-client-token" }));
}

#[actix_web::test]
async fn client_token_failure() {
    let mut backends = Backends::new();
    backends
        .gateway
        .expect_generate_client_token()
        .returning(|| Err(PaymentGatewayError::Unavailable("connection refused".into())));
    let req = TestRequest::get().uri("/api/v1/product/braintree/token").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[actix_web::test]
async fn successful_checkout_records_the_order() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends
        .catalog
        .expect_fetch_products_by_ids()
        .withf(|ids| ids == [1, 2])
        .returning(|_| Ok(vec![product(1, 1999, 1), product(2, 500, 1)]));
    backends
        .gateway
        .expect_sale()
        .withf(|amount, nonce| *amount == Price::from_cents(4498) && nonce == "fake-valid-nonce")
        .times(1)
        .returning(|_, _| Ok(SaleResult::succeeded(json!({ "id": "txn-1", "status": "submitted_for_settlement" }))));
    backends
        .orders
        .expect_insert_order()
        .withf(|o| {
            o.buyer_id == 5 && o.products == [1, 1, 2] && o.payment["success"] == true && o.payment["transaction"]["id"] == "txn-1"
        })
        .times(1)
        .returning(|o| Ok(order(21, o.buyer_id, o.products, OrderStatusType::NotProcess)));
    let cart = json!([1, { "_id": 1, "price": 0.01 }, { "id": 2, "name": "Product 2" }]);
    let req = checkout_request(&valid_token(5, Role::User), json!({ "nonce": "fake-valid-nonce", "cart": cart }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[actix_web::test]
async fn declined_sale_writes_no_order() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.catalog.expect_fetch_products_by_ids().returning(|_| Ok(vec![product(1, 1999, 1)]));
    backends.gateway.expect_sale().times(1).returning(|_, _| {
        Ok(SaleResult::failed("Processor Declined", json!({ "status": "processor_declined" })))
    });
    backends.orders.expect_insert_order().never();
    let req = checkout_request(&valid_token(5, Role::User), json!({ "nonce": "fake-declined-nonce", "cart": [1] }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Processor Declined");
}

#[actix_web::test]
async fn gateway_error_writes_no_order() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.catalog.expect_fetch_products_by_ids().returning(|_| Ok(vec![product(1, 1999, 1)]));
    backends
        .gateway
        .expect_sale()
        .returning(|_, _| Err(PaymentGatewayError::Unavailable("gateway timed out".into())));
    backends.orders.expect_insert_order().never();
    let req = checkout_request(&valid_token(5, Role::User), json!({ "nonce": "fake-valid-nonce", "cart": [1] }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("gateway timed out"));
}

#[actix_web::test]
async fn checkout_requires_sign_in() {
    let mut backends = Backends::new();
    backends.gateway.expect_sale().never();
    backends.orders.expect_insert_order().never();
    let req = TestRequest::post()
        .uri("/api/v1/product/braintree/payment")
        .set_json(json!({ "nonce": "fake-valid-nonce", "cart": [1] }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: No token provided");
}

#[actix_web::test]
async fn empty_cart_never_reaches_the_gateway() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.gateway.expect_sale().never();
    let req = checkout_request(&valid_token(5, Role::User), json!({ "nonce": "fake-valid-nonce", "cart": [] }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], OrderFlowError::EmptyCart.to_string());
}

#[actix_web::test]
async fn missing_nonce_never_reaches_the_gateway() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.gateway.expect_sale().never();
    let req = checkout_request(&valid_token(5, Role::User), json!({ "cart": [1] }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], OrderFlowError::MissingNonce.to_string());
}

#[actix_web::test]
async fn unknown_product_in_cart() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.catalog.expect_fetch_products_by_ids().returning(|_| Ok(vec![product(1, 1999, 1)]));
    backends.gateway.expect_sale().never();
    let req = checkout_request(&valid_token(5, Role::User), json!({ "nonce": "fake-valid-nonce", "cart": [1, 404] }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart contains unknown product 404");
}

#[actix_web::test]
async fn cart_total_overflow_never_reaches_the_gateway() {
    let mut backends = Backends::new().with_account(account(5, Role::User));
    backends.catalog.expect_fetch_products_by_ids().returning(|_| Ok(vec![product(1, i64::MAX / 2 + 1, 1)]));
    backends.gateway.expect_sale().never();
    backends.orders.expect_insert_order().never();
    let req = checkout_request(&valid_token(5, Role::User), json!({ "nonce": "fake-valid-nonce", "cart": [1, 1] }));
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], OrderFlowError::TotalTooLarge.to_string());
}
