use std::sync::Arc;

use graphql_parser::parse_query;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use sf_common::Price;

use crate::{
    config::BraintreeConfig,
    data_objects::{ChargeInput, ChargeTransactionInput, ClientToken, Transaction},
    BraintreeApiError,
};

#[derive(Clone)]
pub struct BraintreeApi {
    config: BraintreeConfig,
    client: Arc<Client>,
}

impl BraintreeApi {
    pub fn new(config: BraintreeConfig) -> Result<Self, BraintreeApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let version = HeaderValue::from_str(config.api_version.as_str())
            .map_err(|e| BraintreeApiError::Initialization(e.to_string()))?;
        headers.insert("Braintree-Version", version);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BraintreeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &BraintreeConfig {
        &self.config
    }

    pub fn url(&self) -> &'static str {
        self.config.environment.graphql_url()
    }

    /// Validates and submits a GraphQL document, returning the deserialized `data` member of the response.
    pub async fn graphql_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T, BraintreeApiError> {
        let query = parse_query::<String>(query).map_err(|e| BraintreeApiError::InvalidGraphQL(e.to_string()))?;
        let mut body = serde_json::json!({
            "query": query.to_string(),
        });
        if let Some(vars) = variables {
            body["variables"] = vars;
        }
        trace!("Sending GraphQL query to {}", self.url());
        let response = self
            .client
            .post(self.url())
            .basic_auth(&self.config.public_key, Some(self.config.private_key.reveal()))
            .json(&body)
            .send()
            .await
            .map_err(|e| BraintreeApiError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| BraintreeApiError::ResponseError(e.to_string()))?;
            return Err(BraintreeApiError::QueryError { status, message });
        }
        let result = response.json::<Value>().await.map_err(|e| BraintreeApiError::JsonError(e.to_string()))?;
        extract_data(result)
    }

    /// Fetches a client token that the browser uses to render the Drop-in payment UI.
    pub async fn generate_client_token(&self) -> Result<ClientToken, BraintreeApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ClientTokenResponse {
            create_client_token: ClientToken,
        }
        let mutation = r#"
        mutation CreateClientToken($input: CreateClientTokenInput) {
          createClientToken(input: $input) { clientToken }
        }"#;
        let variables = self.client_token_variables();
        debug!("💳️ Requesting a new client token");
        let result = self.graphql_query::<ClientTokenResponse>(mutation, Some(variables)).await?;
        Ok(result.create_client_token)
    }

    /// Charges (and submits for settlement) the payment method identified by `nonce`.
    pub async fn charge_payment_method(&self, amount: Price, nonce: &str) -> Result<Transaction, BraintreeApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ChargeResponse {
            charge_payment_method: ChargePayload,
        }
        #[derive(Deserialize)]
        struct ChargePayload {
            transaction: Transaction,
        }
        let mutation = r#"
        mutation ChargePaymentMethod($input: ChargePaymentMethodInput!) {
          chargePaymentMethod(input: $input) {
            transaction { id status createdAt amount { value currencyCode } }
          }
        }"#;
        let variables = self.charge_variables(amount, nonce);
        debug!("💳️ Charging {amount} to payment method");
        let result = self.graphql_query::<ChargeResponse>(mutation, Some(variables)).await?;
        let tx = result.charge_payment_method.transaction;
        info!("💳️ Transaction {} completed with status {}", tx.id, tx.status);
        Ok(tx)
    }

    fn client_token_variables(&self) -> Value {
        serde_json::json!({ "input": { "clientToken": { "merchantAccountId": self.config.merchant_account_id } } })
    }

    fn charge_variables(&self, amount: Price, nonce: &str) -> Value {
        let input = ChargeInput {
            payment_method_id: nonce.to_string(),
            transaction: ChargeTransactionInput {
                amount: amount.to_string(),
                submit_for_settlement: true,
                merchant_account_id: self.config.merchant_account_id.clone(),
            },
        };
        serde_json::json!({ "input": input })
    }
}

fn extract_data<T: DeserializeOwned>(result: Value) -> Result<T, BraintreeApiError> {
    if let Some(errors) = result["errors"].as_array() {
        let e = errors
            .iter()
            .map(|e| e["message"].as_str().map(String::from).unwrap_or_else(|| e.to_string()))
            .collect::<Vec<String>>()
            .join(", ");
        return Err(BraintreeApiError::GraphQLError(e));
    }
    let data = result["data"].clone();
    trace!("GraphQL response: {data}");
    if data.is_null() {
        return Err(BraintreeApiError::EmptyResponse);
    }
    serde_json::from_value(data).map_err(|e| BraintreeApiError::JsonError(e.to_string()))
}
