use std::env;

use braintree_tools::BraintreeConfig;
use chrono::Duration;
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sf_common::Secret;

use crate::errors::ServerError;

const DEFAULT_SF_HOST: &str = "127.0.0.1";
const DEFAULT_SF_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/storefront.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_TOKEN_VALIDITY_DAYS: i64 = 7;
const MAX_TOKEN_VALIDITY_DAYS: i64 = 3_650;
const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The size of the database connection pool.
    pub max_connections: u32,
    pub auth: AuthConfig,
    /// Credentials for the Braintree GraphQL API.
    pub braintree: BraintreeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SF_HOST.to_string(),
            port: DEFAULT_SF_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            auth: AuthConfig::default(),
            braintree: BraintreeConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SF_HOST").ok().unwrap_or_else(|| DEFAULT_SF_HOST.into());
        let port = env::var("SF_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for SF_PORT. {e} Using the default, {DEFAULT_SF_PORT}, instead.");
                    DEFAULT_SF_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SF_PORT);
        let database_url = env::var("SF_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ SF_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = env::var("SF_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for SF_DB_MAX_CONNECTIONS. {e}"))
                    .ok()
            })
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let braintree = BraintreeConfig::new_from_env_or_default();
        Self { host, port, database_url, max_connections, auth, braintree }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC-SHA256 key used to sign and verify access tokens.
    pub jwt_secret: Secret<String>,
    /// How long an access token remains valid after it is issued.
    pub token_validity: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. Every access \
             token will become invalid when the server restarts. DO NOT operate on production like this. Set \
             SF_JWT_SECRET instead. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect::<String>();
        Self { jwt_secret: Secret::new(secret), token_validity: configure_token_validity() }
    }
}

impl AuthConfig {
    pub fn new<S: Into<String>>(secret: S, token_validity: Duration) -> Self {
        Self { jwt_secret: Secret::new(secret.into()), token_validity }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("SF_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [SF_JWT_SECRET]")))?;
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ServerError::ConfigurationError(format!(
                "SF_JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} characters long"
            )));
        }
        let token_validity = configure_token_validity();
        Ok(Self::new(secret, token_validity))
    }
}

fn configure_token_validity() -> Duration {
    let value = env::var("SF_TOKEN_VALIDITY_DAYS").ok();
    if value.is_none() {
        debug!("🪛️ SF_TOKEN_VALIDITY_DAYS is not set. Using the default value of {DEFAULT_TOKEN_VALIDITY_DAYS} days.");
    }
    token_validity_from(value.as_deref())
}

/// Interprets a `SF_TOKEN_VALIDITY_DAYS` value. Anything that is not a whole number of days between 1 and
/// [`MAX_TOKEN_VALIDITY_DAYS`] falls back to the default.
fn token_validity_from(value: Option<&str>) -> Duration {
    let days = value
        .ok_or(())
        .and_then(|s| {
            s.trim().parse::<i64>().map_err(|e| warn!("🪛️ Invalid configuration value for SF_TOKEN_VALIDITY_DAYS. {e}"))
        })
        .and_then(|d| {
            if (1..=MAX_TOKEN_VALIDITY_DAYS).contains(&d) {
                Ok(d)
            } else {
                warn!("🪛️ SF_TOKEN_VALIDITY_DAYS must be between 1 and {MAX_TOKEN_VALIDITY_DAYS}. Ignoring {d}.");
                Err(())
            }
        })
        .unwrap_or(DEFAULT_TOKEN_VALIDITY_DAYS);
    Duration::days(days)
}
