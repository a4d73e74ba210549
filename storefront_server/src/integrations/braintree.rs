//! Connects the Braintree client to the storefront's payment gateway seam.
use braintree_tools::{BraintreeApi, BraintreeApiError, BraintreeConfig};
use log::*;
use serde_json::json;
use storefront_engine::{db_types::Price, ClientToken, PaymentGateway, PaymentGatewayError, SaleResult};

use crate::errors::ServerError;

#[derive(Clone)]
pub struct BraintreeGateway {
    api: BraintreeApi,
}

impl BraintreeGateway {
    pub fn new(config: BraintreeConfig) -> Result<Self, ServerError> {
        let api = BraintreeApi::new(config).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl PaymentGateway for BraintreeGateway {
    async fn generate_client_token(&self) -> Result<ClientToken, PaymentGatewayError> {
        let token = self.api.generate_client_token().await.map_err(to_gateway_error)?;
        Ok(ClientToken { client_token: token.client_token })
    }

    async fn sale(&self, amount: Price, nonce: &str) -> Result<SaleResult, PaymentGatewayError> {
        match self.api.charge_payment_method(amount, nonce).await {
            Ok(tx) if tx.is_success() => Ok(SaleResult::succeeded(tx.as_json())),
            Ok(tx) => {
                let message = format!("Transaction {} was not accepted. Status: {}", tx.id, tx.status);
                Ok(SaleResult::failed(message, tx.as_json()))
            },
            // Braintree reports declines and bad nonces as GraphQL errors
            Err(BraintreeApiError::GraphQLError(message)) => {
                info!("💳️ Braintree declined the sale of {amount}. {message}");
                Ok(SaleResult::failed(message.clone(), json!({ "errors": [{ "message": message }] })))
            },
            Err(e) => Err(to_gateway_error(e)),
        }
    }
}

fn to_gateway_error(e: BraintreeApiError) -> PaymentGatewayError {
    warn!("💳️ Braintree request failed. {e}");
    match e {
        BraintreeApiError::QueryError { .. } | BraintreeApiError::GraphQLError(_) | BraintreeApiError::InvalidGraphQL(_) => {
            PaymentGatewayError::Rejected(e.to_string())
        },
        _ => PaymentGatewayError::Unavailable(e.to_string()),
    }
}
