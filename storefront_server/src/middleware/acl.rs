//! Access control list middleware for the storefront server.
//! This middleware can be placed on any route or service, but it must be wrapped by the sign-in middleware.
//!
//! It reads the [`Identity`] left by the sign-in middleware and fetches the account's current role from the backend.
//! The role in the access token is never trusted, so a demoted administrator loses access immediately. If the account
//! has one of the required roles, the request is allowed to continue. Otherwise, a 403 Forbidden response is returned.
use std::{marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;
use storefront_engine::{db_types::Role, AuthApi, AuthManagement};

use crate::{
    auth::Identity,
    errors::{AuthError, ServerError},
};

pub const FORBIDDEN_MESSAGE: &str = "Forbidden: Admin Access Required";
pub const ACL_FAILURE_MESSAGE: &str = "Error in admin middleware";

pub struct AclMiddlewareFactory<A> {
    required_roles: Vec<Role>,
    _backend: PhantomData<fn() -> A>,
}

impl<A> AclMiddlewareFactory<A> {
    pub fn new(required_roles: &[Role]) -> Self {
        AclMiddlewareFactory { required_roles: required_roles.to_vec(), _backend: PhantomData }
    }
}

impl<S, B, A> Transform<S, ServiceRequest> for AclMiddlewareFactory<A>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    A: AuthManagement + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AclMiddlewareService<S, A>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AclMiddlewareService {
            required_roles: self.required_roles.clone(),
            service: Rc::new(service),
            _backend: PhantomData,
        })
    }
}

pub struct AclMiddlewareService<S, A> {
    required_roles: Vec<Role>,
    service: Rc<S>,
    _backend: PhantomData<fn() -> A>,
}

impl<S, B, A> Service<ServiceRequest> for AclMiddlewareService<S, A>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    A: AuthManagement + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_roles = self.required_roles.clone();
        Box::pin(async move {
            let identity = req.extensions().get::<Identity>().copied().ok_or_else(|| {
                warn!("🔐️ No identity found in request extensions. Is the sign-in middleware missing?");
                ServerError::AuthenticationError(AuthError::AccountNotFound)
            })?;
            let api = req.app_data::<web::Data<AuthApi<A>>>().ok_or_else(|| {
                error!("🔐️ No auth API has been configured for the ACL middleware");
                ServerError::Unspecified(ACL_FAILURE_MESSAGE.to_string())
            })?;
            let role = api.role_for_account(identity.account_id).await.map_err(|e| {
                error!("🔐️ Could not fetch the role for account #{}. {e}", identity.account_id);
                ServerError::Unspecified(ACL_FAILURE_MESSAGE.to_string())
            })?;
            match role {
                Some(role) if required_roles.contains(&role) => service.call(req).await,
                _ => {
                    debug!("🔐️ Account #{} does not have the required roles for {}", identity.account_id, req.path());
                    Err(ServerError::InsufficientPermissions(FORBIDDEN_MESSAGE.to_string()).into())
                },
            }
        })
    }
}
