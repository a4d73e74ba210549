//! # Storefront engine public API
//!
//! The `sfe_api` module exposes the programmatic API for the storefront. The API is modular, so that clients can pick
//! and choose the functionality they want, and each part only demands the backend behaviour it uses.
//!
//! * [`auth_api`] handles registration, login, password recovery and profile changes, and answers role queries for
//!   the authorisation middleware.
//! * [`accounts_api`] is the administrative view over user accounts.
//! * [`catalog_api`] manages categories and products and serves the storefront's browsing queries.
//! * [`order_flow_api`] runs checkout against a [`crate::traits::PaymentGateway`] and manages order status.
//!
//! # API usage
//!
//! An API instance is created by supplying a backend that implements the traits required by the API.
//!
//! ```rust,ignore
//! use storefront_engine::{CatalogApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/storefront.db", 5).await?;
//! // SqliteDatabase implements CatalogManagement
//! let api = CatalogApi::new(db);
//! let categories = api.categories().await?;
//! ```
pub mod account_objects;
pub mod accounts_api;
pub mod auth_api;
pub mod catalog_api;
pub mod catalog_objects;
pub mod order_flow_api;
