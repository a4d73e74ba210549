use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use storefront_engine::{AccountApi, AuthApi, CatalogApi, OrderFlowApi, SqliteDatabase};

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    integrations::braintree::BraintreeGateway,
    routes::configure_routes,
};

/// Initialises the database and payment gateway, then serves requests until the process receives a shutdown signal.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::create_and_migrate(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Connected to database at {}", db.url());
    let gateway = BraintreeGateway::new(config.braintree.clone())?;
    info!("💳️ Payments are processed in the Braintree {} environment", config.braintree.environment);
    let srv = create_server_instance(config, db.clone(), gateway)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    info!("🚀️ Server has shut down. Closing database connections.");
    db.close().await;
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: BraintreeGateway,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(db.clone());
        let accounts_api = AccountApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let orders_api = OrderFlowApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %r").log_target("storefront::access_log"))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::new(gateway.clone()))
            .configure(configure_routes::<SqliteDatabase, BraintreeGateway>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
