use actix_web::{http::StatusCode, test::TestRequest};
use mockall::predicate::eq;
use serde_json::json;
use storefront_engine::{
    db_types::{Category, Price, Product, ProductPhoto, Role},
    traits::{PriceRange, ProductFilter, ProductPage},
};

use super::helpers::{account, bearer, product, send_json_request, send_request, valid_token, Backends};

fn books() -> Category {
    Category { id: 1, name: "Books".into(), slug: "books".into() }
}

fn product_form() -> serde_json::Value {
    json!({
        "name": "Textbook",
        "description": "A comprehensive textbook",
        "price": 79.99,
        "category": 1,
        "quantity": 50,
        "shipping": true,
        "photo": { "data": "iVBORw0KGgo=", "content_type": "image/png" },
    })
}

fn stored(id: i64, p: &storefront_engine::db_types::NewProduct) -> Product {
    Product {
        name: p.name.clone(),
        slug: p.slug.clone(),
        description: p.description.clone(),
        price: p.price,
        category_id: p.category_id,
        quantity: p.quantity,
        shipping: p.shipping,
        ..product(id, 0, 0)
    }
}

#[actix_web::test]
async fn landing_page_lists_the_newest_products() {
    let mut backends = Backends::new();
    backends
        .catalog
        .expect_fetch_products()
        .with(eq(ProductPage { limit: 12, offset: 0 }))
        .times(1)
        .returning(|_| Ok(vec![product(2, 1500, 1), product(1, 999, 1)]));
    let req = TestRequest::get().uri("/api/v1/product/get-product").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counTotal"], 2);
    assert_eq!(body["message"], "All Products");
    assert_eq!(body["products"][0]["price"], 15.0);
    assert!(body["products"][0].get("photo").is_none());
}

#[actix_web::test]
async fn single_product_by_slug() {
    let mut backends = Backends::new();
    backends
        .catalog
        .expect_fetch_product_by_slug()
        .withf(|slug| slug == "product-3")
        .returning(|_| Ok(Some(product(3, 2500, 1))));
    let req = TestRequest::get().uri("/api/v1/product/get-product/product-3").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["id"], 3);
    assert_eq!(body["product"]["category_id"], 1);
}

#[actix_web::test]
async fn photo_is_served_with_its_content_type() {
    let mut backends = Backends::new();
    backends
        .catalog
        .expect_fetch_product_photo()
        .with(eq(3))
        .returning(|_| Ok(Some(ProductPhoto { data: vec![0x89, b'P', b'N', b'G'], content_type: "image/png".into() })));
    let req = TestRequest::get().uri("/api/v1/product/product-photo/3").to_request();
    let (status, body) = send_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_ref(), &[0x89, b'P', b'N', b'G']);
}

#[actix_web::test]
async fn missing_photo() {
    let mut backends = Backends::new();
    backends.catalog.expect_fetch_product_photo().returning(|_| Ok(None));
    let req = TestRequest::get().uri("/api/v1/product/product-photo/3").to_request();
    let (status, _) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admin_creates_a_product() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.catalog.expect_fetch_category_by_id().with(eq(1)).returning(|_| Ok(Some(books())));
    backends
        .catalog
        .expect_insert_product()
        .withf(|p| {
            p.slug == "textbook" &&
                p.price == Price::from_cents(7999) &&
                p.photo.as_ref().map(|ph| ph.content_type.as_str()) == Some("image/png")
        })
        .times(1)
        .returning(|p| Ok(stored(8, &p)));
    let req = TestRequest::post()
        .uri("/api/v1/product/create-product")
        .insert_header(bearer(&valid_token(1, Role::Admin)))
        .set_json(product_form())
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product Created Successfully");
    assert_eq!(body["product"]["slug"], "textbook");
    assert_eq!(body["product"]["price"], 79.99);
}

#[actix_web::test]
async fn product_without_a_name() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.catalog.expect_insert_product().never();
    let mut form = product_form();
    form["name"] = json!("");
    let req = TestRequest::post()
        .uri("/api/v1/product/create-product")
        .insert_header(bearer(&valid_token(1, Role::Admin)))
        .set_json(form)
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name is Required");
}

#[actix_web::test]
async fn product_in_unknown_category() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.catalog.expect_fetch_category_by_id().returning(|_| Ok(None));
    backends.catalog.expect_insert_product().never();
    let mut form = product_form();
    form["category"] = json!(77);
    let req = TestRequest::post()
        .uri("/api/v1/product/create-product")
        .insert_header(bearer(&valid_token(1, Role::Admin)))
        .set_json(form)
        .to_request();
    let (status, _) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_without_photo_keeps_the_stored_one() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.catalog.expect_fetch_category_by_id().returning(|_| Ok(Some(books())));
    backends
        .catalog
        .expect_update_product()
        .withf(|id, p| *id == 8 && p.photo.is_none() && p.quantity == 49)
        .times(1)
        .returning(|id, p| Ok(Some(stored(id, &p))));
    let mut form = product_form();
    form.as_object_mut().unwrap().remove("photo");
    form["quantity"] = json!(49);
    let req = TestRequest::put()
        .uri("/api/v1/product/update-product/8")
        .insert_header(bearer(&valid_token(1, Role::Admin)))
        .set_json(form)
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product Updated Successfully");
    assert_eq!(body["product"]["quantity"], 49);
}

#[actix_web::test]
async fn admin_deletes_a_product() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.catalog.expect_delete_product().with(eq(8)).times(1).returning(|id| Ok(Some(product(id, 100, 1))));
    let req = TestRequest::delete()
        .uri("/api/v1/product/delete-product/8")
        .insert_header(bearer(&valid_token(1, Role::Admin)))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn shoppers_cannot_delete_products() {
    let mut backends = Backends::new().with_account(account(2, Role::User));
    backends.catalog.expect_delete_product().never();
    let req = TestRequest::delete()
        .uri("/api/v1/product/delete-product/8")
        .insert_header(bearer(&valid_token(2, Role::User)))
        .to_request();
    let (status, _) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn filters_accept_prices_in_either_order() {
    let mut backends = Backends::new();
    let expected = ProductFilter {
        category_ids: vec![1, 2],
        price_range: Some(PriceRange { min: Price::from_cents(2000), max: Price::from_cents(3999) }),
    };
    backends
        .catalog
        .expect_filter_products()
        .with(eq(expected))
        .times(1)
        .returning(|_| Ok(vec![product(4, 2500, 2)]));
    let req = TestRequest::post()
        .uri("/api/v1/product/product-filters")
        .set_json(json!({ "checked": [1, 2], "radio": [39.99, 20] }))
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["id"], 4);
}

#[actix_web::test]
async fn product_count_and_pages() {
    let mut backends = Backends::new();
    backends.catalog.expect_count_products().returning(|| Ok(13));
    let req = TestRequest::get().uri("/api/v1/product/product-count").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "total": 13 }));

    let mut backends = Backends::new();
    backends
        .catalog
        .expect_fetch_products()
        .with(eq(ProductPage { limit: 6, offset: 12 }))
        .times(1)
        .returning(|_| Ok(vec![product(1, 100, 1)]));
    let req = TestRequest::get().uri("/api/v1/product/product-list/3").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn far_away_pages_are_empty() {
    let mut backends = Backends::new();
    backends
        .catalog
        .expect_fetch_products()
        .with(eq(ProductPage { limit: 6, offset: i64::MAX }))
        .times(1)
        .returning(|_| Ok(vec![]));
    let req = TestRequest::get().uri("/api/v1/product/product-list/9223372036854775807").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], json!([]));
}

#[actix_web::test]
async fn product_price_above_the_cap() {
    let mut backends = Backends::new().with_account(account(1, Role::Admin));
    backends.catalog.expect_insert_product().never();
    let mut form = product_form();
    form["price"] = json!(10_000_000.01);
    let req = TestRequest::post()
        .uri("/api/v1/product/create-product")
        .insert_header(bearer(&valid_token(1, Role::Admin)))
        .set_json(form)
        .to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Price is too large");
}

#[actix_web::test]
async fn search_returns_a_bare_list() {
    let mut backends = Backends::new();
    backends
        .catalog
        .expect_search_products()
        .withf(|keyword| keyword == "novel")
        .returning(|_| Ok(vec![product(5, 1200, 1)]));
    let req = TestRequest::get().uri("/api/v1/product/search/novel").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["slug"], "product-5");
}

#[actix_web::test]
async fn related_products_exclude_the_product_itself() {
    let mut backends = Backends::new();
    backends
        .catalog
        .expect_related_products()
        .with(eq(5), eq(1), eq(3))
        .times(1)
        .returning(|_, _, _| Ok(vec![product(6, 1000, 1), product(7, 1100, 1)]));
    let req = TestRequest::get().uri("/api/v1/product/related-product/5/1").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn products_by_category_slug() {
    let mut backends = Backends::new();
    backends.catalog.expect_fetch_category_by_slug().withf(|slug| slug == "books").returning(|_| Ok(Some(books())));
    backends.catalog.expect_products_in_category().with(eq(1)).returning(|_| Ok(vec![product(5, 1200, 1)]));
    let req = TestRequest::get().uri("/api/v1/product/product-category/books").to_request();
    let (status, body) = send_json_request(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["slug"], "books");
    assert_eq!(body["products"][0]["id"], 5);
}
