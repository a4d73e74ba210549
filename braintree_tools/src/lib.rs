//! A thin client for the parts of the Braintree GraphQL API that the storefront needs:
//! issuing client tokens for the hosted payment fields, and charging a payment method nonce.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::BraintreeApi;
pub use config::{BraintreeConfig, BraintreeEnvironment};
pub use data_objects::{ChargeInput, ClientToken, Money, Transaction};
pub use error::BraintreeApiError;
