use std::{fmt::Display, str::FromStr};

use log::*;
use sf_common::Secret;

const SANDBOX_URL: &str = "https://payments.sandbox.braintree-api.com/graphql";
const PRODUCTION_URL: &str = "https://payments.braintree-api.com/graphql";
const DEFAULT_API_VERSION: &str = "2019-01-01";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BraintreeEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl BraintreeEnvironment {
    pub fn graphql_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_URL,
            Self::Production => PRODUCTION_URL,
        }
    }
}

impl FromStr for BraintreeEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(format!("Unknown Braintree environment: {s}")),
        }
    }
}

impl Display for BraintreeEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BraintreeConfig {
    pub environment: BraintreeEnvironment,
    /// The merchant account that sales settle into. `None` uses the gateway's default account.
    pub merchant_account_id: Option<String>,
    pub public_key: String,
    pub private_key: Secret<String>,
    pub api_version: String,
}

impl BraintreeConfig {
    pub fn new_from_env_or_default() -> Self {
        let environment = std::env::var("SF_BRAINTREE_ENVIRONMENT")
            .ok()
            .and_then(|s| {
                s.parse::<BraintreeEnvironment>()
                    .map_err(|e| warn!("💳️ {e}. Falling back to the sandbox environment"))
                    .ok()
            })
            .unwrap_or_default();
        let merchant_account_id = std::env::var("SF_BRAINTREE_MERCHANT_ACCOUNT_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if merchant_account_id.is_none() {
            debug!("💳️ SF_BRAINTREE_MERCHANT_ACCOUNT_ID not set. Sales will use the default merchant account.");
        }
        let public_key = std::env::var("SF_BRAINTREE_PUBLIC_KEY").unwrap_or_else(|_| {
            warn!("💳️ SF_BRAINTREE_PUBLIC_KEY not set, using (probably useless) default");
            "public_key".to_string()
        });
        let private_key = Secret::new(std::env::var("SF_BRAINTREE_PRIVATE_KEY").unwrap_or_else(|_| {
            warn!("💳️ SF_BRAINTREE_PRIVATE_KEY not set, using (probably useless) default");
            "private_key".to_string()
        }));
        let api_version = std::env::var("SF_BRAINTREE_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        Self { environment, merchant_account_id, public_key, private_key, api_version }
    }
}
