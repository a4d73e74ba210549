//! Sign-in middleware for the storefront server.
//!
//! Reads the access token from the `Authorization` header (with or without a `Bearer ` prefix), checks its signature
//! and expiry, and looks the account up again. On success an [`Identity`] is stored in the request extensions and the
//! request continues. On any failure the request is rejected with a 401 and the wrapped service is never called.
use std::{marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;
use storefront_engine::{AuthApi, AuthManagement};

use crate::{
    auth::{token_from_header, Identity, TokenIssuer},
    errors::{AuthError, ServerError},
};

pub struct SignInMiddlewareFactory<A> {
    _backend: PhantomData<fn() -> A>,
}

impl<A> SignInMiddlewareFactory<A> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _backend: PhantomData }
    }
}

impl<S, B, A> Transform<S, ServiceRequest> for SignInMiddlewareFactory<A>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    A: AuthManagement + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SignInMiddlewareService<S, A>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SignInMiddlewareService { service: Rc::new(service), _backend: PhantomData })
    }
}

pub struct SignInMiddlewareService<S, A> {
    service: Rc<S>,
    _backend: PhantomData<fn() -> A>,
}

impl<S, B, A> Service<ServiceRequest> for SignInMiddlewareService<S, A>
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
        Box::pin(async move {
            let identity = resolve_identity::<A>(&req).await?;
            trace!("🔐️ Request to {} is signed in as account #{}", req.path(), identity.account_id);
            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}

async fn resolve_identity<A: AuthManagement + 'static>(req: &ServiceRequest) -> Result<Identity, ServerError> {
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let token = header.to_str().map(token_from_header).map_err(|_| AuthError::InvalidToken)?;
    if token.is_empty() {
        return Err(AuthError::MissingToken.into());
    }
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::ConfigurationError("No token issuer has been configured".to_string()))?;
    let claims = issuer.decode(token)?;
    let account_id = claims.account_id()?;
    let api = req
        .app_data::<web::Data<AuthApi<A>>>()
        .ok_or_else(|| ServerError::ConfigurationError("No auth API has been configured".to_string()))?;
    let account = api.account_by_id(account_id).await?.ok_or_else(|| {
        debug!("🔐️ Token for account #{account_id} is valid, but the account no longer exists");
        AuthError::AccountNotFound
    })?;
    Ok(Identity { account_id: account.id, role: account.role })
}
