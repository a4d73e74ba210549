//! Storefront Engine
//!
//! This library contains the core logic for the storefront backend: accounts, the product catalogue, checkout and
//! orders. It knows nothing about HTTP and nothing about any particular payment processor.
//!
//! The library is divided into three main sections:
//! 1. The backend contracts ([`mod@traits`]). A backend implements the traits for the concerns it supports. The
//!    [`PaymentGateway`] trait is the seam to the card processor.
//! 2. Database management ([`SqliteDatabase`]). You should never need to access the database directly. Instead, use
//!    the public API. The exception is the data types used in the database. These are defined in the `db_types`
//!    module and are public.
//! 3. The public API ([`mod@sfe_api`]). Each API wraps a backend that implements the traits it needs.
pub mod db_types;
pub mod helpers;
mod sfe_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{db as sqlite_db, SqliteDatabase};
pub use sfe_api::{
    account_objects,
    accounts_api::AccountApi,
    auth_api::AuthApi,
    catalog_api::CatalogApi,
    catalog_objects,
    order_flow_api::OrderFlowApi,
};
pub use traits::{
    AccountApiError,
    AccountManagement,
    AuthApiError,
    AuthManagement,
    CatalogApiError,
    CatalogManagement,
    ClientToken,
    OrderFlowError,
    OrderManagement,
    PaymentGateway,
    PaymentGatewayError,
    SaleResult,
};
