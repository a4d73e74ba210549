//! Access tokens and the per-request identity.
//!
//! Access tokens are HS256 JWTs. The subject is the account id; the role claim is informational only, since the
//! role is always re-read from the database before it is relied upon. Tokens are not refreshed and cannot be revoked:
//! once one expires the user has to log in again.
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};
use storefront_engine::db_types::Role;

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The account id, as a string.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    pub fn account_id(&self) -> Result<i64, AuthError> {
        self.sub.parse::<i64>().map_err(|_| AuthError::InvalidToken)
    }
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            validity: config.token_validity,
        }
    }

    /// Issue a new access token for the given account, valid for the configured period.
    pub fn issue_token(&self, account_id: i64, role: Option<Role>) -> Result<String, ServerError> {
        self.issue_token_with_validity(account_id, role, self.validity)
    }

    pub fn issue_token_with_validity(
        &self,
        account_id: i64,
        role: Option<Role>,
        validity: Duration,
    ) -> Result<String, ServerError> {
        let now = Utc::now();
        let claims =
            JwtClaims { sub: account_id.to_string(), role, iat: now.timestamp(), exp: (now + validity).timestamp() };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServerError::Unspecified(format!("Could not sign access token. {e}")))
    }

    /// Checks the signature and expiry of an access token and returns its claims.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("🔐️ Rejected access token. {e}");
            AuthError::InvalidToken
        })?;
        Ok(data.claims)
    }
}

/// The signed-in account for the current request.
///
/// The sign-in middleware places this in the request extensions once the token has been checked and the account
/// has been found. Handlers take it as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub account_id: i64,
    pub role: Role,
}

impl FromRequest for Identity {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().copied();
        ready(identity.ok_or(ServerError::AuthenticationError(AuthError::AccountNotFound)))
    }
}

/// Strips the optional `Bearer ` prefix from an `Authorization` header value.
pub fn token_from_header(value: &str) -> &str {
    let value = value.trim();
    match value.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => value[7..].trim_start(),
        _ => value,
    }
}
