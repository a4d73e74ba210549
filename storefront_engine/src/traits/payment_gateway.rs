use serde::{Deserialize, Serialize};
use serde_json::Value;
use sf_common::Price;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("Could not reach the payment gateway: {0}")]
    Unavailable(String),
    #[error("The payment gateway rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientToken {
    pub client_token: String,
}

/// The outcome of a sale. `transaction` is the gateway's own description of the transaction and is stored verbatim
/// as the order's payment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleResult {
    pub success: bool,
    pub message: Option<String>,
    pub transaction: Value,
}

impl SaleResult {
    pub fn succeeded(transaction: Value) -> Self {
        Self { success: true, message: None, transaction }
    }

    pub fn failed<S: Into<String>>(message: S, transaction: Value) -> Self {
        Self { success: false, message: Some(message.into()), transaction }
    }
}

/// The external card processor.
///
/// Neither call is retried and neither carries an idempotency key: a sale that times out may or may not have been
/// captured.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// Issues a token that the browser uses to tokenise card details into a payment-method nonce.
    async fn generate_client_token(&self) -> Result<ClientToken, PaymentGatewayError>;

    /// Charges `amount` to the payment method behind `nonce`. A declined card is `Ok` with `success: false`;
    /// `Err` means the gateway could not be asked at all.
    async fn sale(&self, amount: Price, nonce: &str) -> Result<SaleResult, PaymentGatewayError>;
}
