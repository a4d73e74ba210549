//! # Backend behaviour
//!
//! This module defines the contracts that storefront backends must satisfy. Each trait covers one concern, so that an
//! API only demands the behaviour it actually uses, and tests can mock exactly that.
//!
//! * [`AuthManagement`] creates accounts and looks them up for login, session resolution and role checks.
//! * [`AccountManagement`] provides the administrative view over all accounts.
//! * [`CatalogManagement`] covers categories and products, including the storefront browsing queries.
//! * [`OrderManagement`] persists completed orders and drives their fulfilment status.
//! * [`PaymentGateway`] is the seam to the external card processor. It is not a database trait, but it follows the
//!   same conventions.
mod account_management;
mod auth_management;
mod catalog_management;
mod data_objects;
mod order_management;
mod payment_gateway;

pub use account_management::{AccountApiError, AccountManagement};
pub use auth_management::{AuthApiError, AuthManagement};
pub use catalog_management::{CatalogApiError, CatalogManagement};
pub use data_objects::{PriceRange, ProductFilter, ProductPage};
pub use order_management::{OrderFlowError, OrderManagement};
pub use payment_gateway::{ClientToken, PaymentGateway, PaymentGatewayError, SaleResult};
