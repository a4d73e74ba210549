//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two of glue belong in the engine APIs. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, password hashing, calls to the
//! payment gateway) should be expressed as futures or asynchronous functions. Async handlers get executed concurrently
//! by worker threads and thus don’t block execution.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use serde_json::json;
use storefront_engine::{
    account_objects::{ProfileChanges, Registration},
    catalog_objects::ProductInput,
    db_types::{OrderStatusType, Role},
    traits::{AccountManagement, AuthManagement, CatalogManagement, OrderManagement, PaymentGateway},
    AccountApi,
    AuthApi,
    CatalogApi,
    OrderFlowApi,
};

use crate::{
    auth::{Identity, TokenIssuer},
    data_objects::{
        CategoryRequest,
        ForgotPasswordRequest,
        JsonResponse,
        LoginRequest,
        OrderStatusUpdate,
        PaymentRequest,
        ProductFilterRequest,
        ProductRequest,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
//
// * `impl Bound, ...` registers a public route, generic over one type per bound.
// * `impl Bound, ... where signed_in` requires a valid access token. The backend must implement `AuthManagement`.
// * `impl Bound, ... where requires [roles]` additionally requires the account's live role to be one of `roles`.
// * `impl Bound, ... ; with GatewayBound where signed_in` is a signed-in route that also takes a payment gateway.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where signed_in) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::SignInMiddlewareFactory::<A>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires [$($roles:expr),+]) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                // The last middleware added runs first, so the sign-in check precedes the ACL
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AclMiddlewareFactory::<A>::new(&[$($roles),+]))
                    .wrap($crate::middleware::SignInMiddlewareFactory::<A>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ ; with $gateway:ty where signed_in) => {
        paste::paste! { pub struct [<$name:camel Route>]<A, G>(core::marker::PhantomData<fn() -> (A, G)>);}
        paste::paste! { impl<A, G> [<$name:camel Route>]<A, G> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> (A, G)>)
            }
        }}
        paste::paste! { impl<A, G> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A, G>
        where
            A: $($bounds +)+ 'static,
            G: $gateway + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A, G>)
                    .wrap($crate::middleware::SignInMiddlewareFactory::<A>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register => Post "/register" impl AuthManagement);
/// Creates a standard (non-admin) account. Every field of the registration form is required.
pub async fn register<A: AuthManagement>(
    body: web::Json<Registration>,
    api: web::Data<AuthApi<A>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received registration request");
    let user = api.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User registered successfully",
        "user": user,
    })))
}

route!(login => Post "/login" impl AuthManagement);
/// Route handler for the login endpoint
///
/// Checks the email and password and, if they match, issues an access token. The token must be supplied in the
/// `Authorization` header of subsequent requests, either bare or with a `Bearer ` prefix. It is valid for a fixed
/// period (7 days by default) and does NOT refresh.
pub async fn login<A: AuthManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<A>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received login request");
    let user = api.login(&body.email, &body.password).await?;
    let token = signer.issue_token(user.id, Some(user.role))?;
    trace!("💻️ Issued access token for account #{}", user.id);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successfully",
        "user": user,
        "token": token,
    })))
}

route!(forgot_password => Post "/forgot-password" impl AuthManagement);
pub async fn forgot_password<A: AuthManagement>(
    body: web::Json<ForgotPasswordRequest>,
    api: web::Data<AuthApi<A>>,
) -> Result<HttpResponse, ServerError> {
    api.reset_password(&body.email, &body.answer, &body.new_password).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Password reset successfully")))
}

route!(protected_test => Get "/test" impl AuthManagement where requires [Role::Admin]);
pub async fn protected_test<A: AuthManagement>() -> Result<HttpResponse, ServerError> {
    Ok(HttpResponse::Ok().json(json!({ "message": "Protected Routes" })))
}

route!(user_auth => Get "/user-auth" impl AuthManagement where signed_in);
/// Lets the storefront check whether its stored token is still good.
pub async fn user_auth<A: AuthManagement>(identity: Identity) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Account #{} is signed in", identity.account_id);
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

route!(admin_auth => Get "/admin-auth" impl AuthManagement where requires [Role::Admin]);
pub async fn admin_auth<A: AuthManagement>(identity: Identity) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Account #{} is signed in as an administrator", identity.account_id);
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

route!(update_profile => Put "/profile" impl AuthManagement where signed_in);
/// Updates the signed-in user's own profile. Blank fields are left unchanged; a new password is hashed before it is
/// stored.
pub async fn update_profile<A: AuthManagement>(
    identity: Identity,
    body: web::Json<ProfileChanges>,
    api: web::Data<AuthApi<A>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ PUT profile for account #{}", identity.account_id);
    let updated = api.update_profile(identity.account_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "updatedUser": updated,
    })))
}

route!(my_orders => Get "/orders" impl AuthManagement, OrderManagement, CatalogManagement where signed_in);
/// Route handler for the orders endpoint
///
/// Authenticated users can fetch their own orders using this endpoint. The account is taken from the access token.
/// Administrators can use `/all-orders` to see every order in the store.
pub async fn my_orders<A: OrderManagement + CatalogManagement>(
    identity: Identity,
    api: web::Data<OrderFlowApi<A>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for account #{}", identity.account_id);
    let orders = api.orders_for_buyer(identity.account_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Orders retrieved successfully",
        "orders": orders,
    })))
}

route!(all_orders => Get "/all-orders" impl AuthManagement, OrderManagement, CatalogManagement where requires [Role::Admin]);
pub async fn all_orders<A: OrderManagement + CatalogManagement>(
    api: web::Data<OrderFlowApi<A>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all orders");
    let orders = api.all_orders().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "All orders retrieved successfully",
        "orders": orders,
    })))
}

route!(order_status => Put "/order-status/{order_id}" impl AuthManagement, OrderManagement, CatalogManagement where requires [Role::Admin]);
/// Moves an order to a new fulfilment status. Valid statuses are "Not Process", "Processing", "Shipped", "Delivered"
/// and "Cancelled".
pub async fn order_status<A: OrderManagement + CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<OrderStatusUpdate>,
    api: web::Data<OrderFlowApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    let status = body
        .status
        .parse::<OrderStatusType>()
        .map_err(|_| ServerError::ValidationError(format!("Invalid order status: {}", body.status)))?;
    debug!("💻️ PUT order #{order_id} status to {status}");
    let order = api.update_order_status(order_id, status).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order status updated successfully",
        "order": order,
    })))
}

route!(users => Get "/users" impl AuthManagement, AccountManagement where requires [Role::Admin]);
pub async fn users<A: AccountManagement>(api: web::Data<AccountApi<A>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all users");
    let users = api.all_accounts().await?;
    Ok(HttpResponse::Ok().json(users))
}

route!(user_by_id => Get "/user/{user_id}" impl AuthManagement, AccountManagement where requires [Role::Admin]);
pub async fn user_by_id<A: AccountManagement>(
    path: web::Path<i64>,
    api: web::Data<AccountApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ GET user #{user_id}");
    let user = api.account_by_id(user_id).await?.ok_or_else(|| ServerError::NoRecordFound("User not found".into()))?;
    Ok(HttpResponse::Ok().json(user))
}

//----------------------------------------------   Categories  ----------------------------------------------------
route!(create_category => Post "/create-category" impl AuthManagement, CatalogManagement where requires [Role::Admin]);
pub async fn create_category<A: CatalogManagement>(
    body: web::Json<CategoryRequest>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let category = api.create_category(&body.name).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "New category created",
        "category": category,
    })))
}

route!(update_category => Put "/update-category/{id}" impl AuthManagement, CatalogManagement where requires [Role::Admin]);
/// Renames a category. The slug follows the new name.
pub async fn update_category<A: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<CategoryRequest>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let category = api.update_category(path.into_inner(), &body.name).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Category Updated Successfully",
        "category": category,
    })))
}

route!(get_category => Get "/get-category" impl CatalogManagement);
pub async fn get_category<A: CatalogManagement>(api: web::Data<CatalogApi<A>>) -> Result<HttpResponse, ServerError> {
    let categories = api.categories().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "All Categories List",
        "category": categories,
    })))
}

route!(single_category => Get "/single-category/{slug}" impl CatalogManagement);
pub async fn single_category<A: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let category = api.category_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Get Single Category Successfully",
        "category": category,
    })))
}

route!(delete_category => Delete "/delete-category/{id}" impl AuthManagement, CatalogManagement where requires [Role::Admin]);
/// Deletes an empty category. Categories that still have products are not deleted (409).
pub async fn delete_category<A: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let category = api.delete_category(path.into_inner()).await?;
    info!("💻️ Category '{}' was deleted", category.name);
    Ok(HttpResponse::Ok().json(JsonResponse::success("Category Deleted Successfully")))
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(create_product => Post "/create-product" impl AuthManagement, CatalogManagement where requires [Role::Admin]);
/// Route handler for creating products
///
/// The body is JSON. The optional photo is embedded as `{"data": "<base64>", "content_type": "image/png"}` and may not
/// exceed 1 MB once decoded.
pub async fn create_product<A: CatalogManagement>(
    body: web::Json<ProductRequest>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let input = ProductInput::try_from(body.into_inner())?;
    let product = api.create_product(input).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Product Created Successfully",
        "product": product,
    })))
}

route!(update_product => Put "/update-product/{pid}" impl AuthManagement, CatalogManagement where requires [Role::Admin]);
/// Replaces a product's details. Leaving out the photo keeps the stored one.
pub async fn update_product<A: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<ProductRequest>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let input = ProductInput::try_from(body.into_inner())?;
    let product = api.update_product(path.into_inner(), input).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Product Updated Successfully",
        "product": product,
    })))
}

route!(get_products => Get "/get-product" impl CatalogManagement);
/// The storefront landing listing: the 12 newest products.
pub async fn get_products<A: CatalogManagement>(api: web::Data<CatalogApi<A>>) -> Result<HttpResponse, ServerError> {
    let products = api.latest_products().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "counTotal": products.len(),
        "message": "All Products",
        "products": products,
    })))
}

route!(get_product => Get "/get-product/{slug}" impl CatalogManagement);
pub async fn get_product<A: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let product = api.product_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Single Product Fetched",
        "product": product,
    })))
}

route!(product_photo => Get "/product-photo/{pid}" impl CatalogManagement);
pub async fn product_photo<A: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let photo = api.product_photo(path.into_inner()).await?;
    Ok(HttpResponse::Ok().content_type(photo.content_type).body(photo.data))
}

route!(delete_product => Delete "/delete-product/{pid}" impl AuthManagement, CatalogManagement where requires [Role::Admin]);
pub async fn delete_product<A: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let product = api.delete_product(path.into_inner()).await?;
    info!("💻️ Product '{}' was deleted", product.name);
    Ok(HttpResponse::Ok().json(JsonResponse::success("Product Deleted successfully")))
}

route!(product_filters => Post "/product-filters" impl CatalogManagement);
/// Products in any of the `checked` categories (all categories if none are checked) and, if `radio` holds two prices,
/// within that price range.
pub async fn product_filters<A: CatalogManagement>(
    body: web::Json<ProductFilterRequest>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let price_range = body.price_range()?;
    let body = body.into_inner();
    let products = api.filter_products(body.checked, price_range).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "products": products })))
}

route!(product_count => Get "/product-count" impl CatalogManagement);
pub async fn product_count<A: CatalogManagement>(api: web::Data<CatalogApi<A>>) -> Result<HttpResponse, ServerError> {
    let total = api.product_count().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "total": total })))
}

route!(product_list => Get "/product-list/{page}" impl CatalogManagement);
pub async fn product_list<A: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let products = api.product_page(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "products": products })))
}

route!(search_products => Get "/search/{keyword}" impl CatalogManagement);
pub async fn search_products<A: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let keyword = path.into_inner();
    trace!("💻️ Searching for '{keyword}'");
    let products = api.search(&keyword).await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(related_products => Get "/related-product/{pid}/{cid}" impl CatalogManagement);
pub async fn related_products<A: CatalogManagement>(
    path: web::Path<(i64, i64)>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let (product_id, category_id) = path.into_inner();
    let products = api.related_products(product_id, category_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "products": products })))
}

route!(product_category => Get "/product-category/{slug}" impl CatalogManagement);
pub async fn product_category<A: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let (category, products) = api.products_for_category(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "category": category, "products": products })))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(braintree_token => Get "/braintree/token" impl PaymentGateway);
/// Issues a client token for the browser's payment form. Gateway failures are reported as-is and not retried.
pub async fn braintree_token<G: PaymentGateway>(gateway: web::Data<G>) -> Result<HttpResponse, ServerError> {
    trace!("💳️ Client token requested");
    let token = gateway.generate_client_token().await?;
    Ok(HttpResponse::Ok().json(token))
}

route!(braintree_payment => Post "/braintree/payment" impl AuthManagement, OrderManagement, CatalogManagement ; with PaymentGateway where signed_in);
/// Route handler for checkout
///
/// The body carries the payment method nonce produced by the browser and the cart. The amount charged is computed
/// from the catalogue prices of the products in the cart; client-side prices are ignored. An order is recorded only
/// if the gateway accepts the sale. There is no idempotency key, so a client that retries after a timeout may be
/// charged twice.
pub async fn braintree_payment<A, G>(
    identity: Identity,
    body: web::Json<PaymentRequest>,
    api: web::Data<OrderFlowApi<A>>,
    gateway: web::Data<G>,
) -> Result<HttpResponse, ServerError>
where
    A: OrderManagement + CatalogManagement,
    G: PaymentGateway,
{
    let cart = body.product_ids();
    debug!("💳️ Checkout of {} items for account #{}", cart.len(), identity.account_id);
    let order = api.checkout(gateway.get_ref(), identity.account_id, &body.nonce, &cart).await?;
    info!("💳️ Payment accepted. Order #{} created for account #{}", order.id, identity.account_id);
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

//----------------------------------------------   Wiring  ----------------------------------------------------

/// Registers every route under `/api/v1`, plus the health check, and makes malformed JSON bodies and paths produce
/// the standard 400 error body.
pub fn configure_routes<A, G>(cfg: &mut web::ServiceConfig)
where
    A: AuthManagement + AccountManagement + CatalogManagement + OrderManagement + 'static,
    G: PaymentGateway + 'static,
{
    let auth_scope = web::scope("/auth")
        .service(RegisterRoute::<A>::new())
        .service(LoginRoute::<A>::new())
        .service(ForgotPasswordRoute::<A>::new())
        .service(ProtectedTestRoute::<A>::new())
        .service(UserAuthRoute::<A>::new())
        .service(AdminAuthRoute::<A>::new())
        .service(UpdateProfileRoute::<A>::new())
        .service(MyOrdersRoute::<A>::new())
        .service(AllOrdersRoute::<A>::new())
        .service(OrderStatusRoute::<A>::new())
        .service(UsersRoute::<A>::new())
        .service(UserByIdRoute::<A>::new());
    let category_scope = web::scope("/category")
        .service(CreateCategoryRoute::<A>::new())
        .service(UpdateCategoryRoute::<A>::new())
        .service(GetCategoryRoute::<A>::new())
        .service(SingleCategoryRoute::<A>::new())
        .service(DeleteCategoryRoute::<A>::new());
    let product_scope = web::scope("/product")
        .service(CreateProductRoute::<A>::new())
        .service(UpdateProductRoute::<A>::new())
        .service(GetProductsRoute::<A>::new())
        .service(GetProductRoute::<A>::new())
        .service(ProductPhotoRoute::<A>::new())
        .service(DeleteProductRoute::<A>::new())
        .service(ProductFiltersRoute::<A>::new())
        .service(ProductCountRoute::<A>::new())
        .service(ProductListRoute::<A>::new())
        .service(SearchProductsRoute::<A>::new())
        .service(RelatedProductsRoute::<A>::new())
        .service(ProductCategoryRoute::<A>::new())
        .service(BraintreeTokenRoute::<G>::new())
        .service(BraintreePaymentRoute::<A, G>::new());
    cfg.app_data(
        web::JsonConfig::default().error_handler(|e, _req| ServerError::InvalidRequestBody(e.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|e, _req| ServerError::InvalidRequestPath(e.to_string()).into()))
    .service(health)
    .service(web::scope("/api/v1").service(auth_scope).service(category_scope).service(product_scope));
}
