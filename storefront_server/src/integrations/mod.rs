//! Adapters between the storefront and third-party services.
pub mod braintree;
