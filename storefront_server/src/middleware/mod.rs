//! Request guards for protected routes.
//!
//! [`SignInMiddlewareFactory`] authenticates the caller and attaches an [`crate::auth::Identity`] to the request.
//! [`AclMiddlewareFactory`] must run after it and checks the caller's live role. The `route!` macro wires them in the
//! right order.
mod acl;
mod sign_in;

pub use acl::{AclMiddlewareFactory, AclMiddlewareService};
pub use sign_in::{SignInMiddlewareFactory, SignInMiddlewareService};
