//! # Storefront server
//! This crate hosts the HTTP API for the storefront. It is responsible for:
//! Authenticating requests with signed access tokens, and checking the caller's live role on admin routes.
//! Translating JSON requests into calls on the storefront engine APIs, and engine errors into JSON error responses.
//! Running checkout against the Braintree payment gateway.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/v1/auth/...`: Registration, login, password reset, profile and order management.
//! * `/api/v1/category/...`: Category browsing and administration.
//! * `/api/v1/product/...`: Product browsing and administration, and the Braintree checkout endpoints.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
