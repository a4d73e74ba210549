use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientToken {
    pub client_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub value: String,
    pub currency_code: String,
}

/// A transaction as reported by the `chargePaymentMethod` mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    /// Braintree reports a successful sale as `SUBMITTED_FOR_SETTLEMENT` (or later settlement states). Anything
    /// in the failed/declined family is not a success.
    pub fn is_success(&self) -> bool {
        matches!(
            self.status.as_str(),
            "AUTHORIZED" | "SUBMITTED_FOR_SETTLEMENT" | "SETTLING" | "SETTLED" | "SETTLEMENT_PENDING"
        )
    }

    pub fn as_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeInput {
    pub payment_method_id: String,
    pub transaction: ChargeTransactionInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeTransactionInput {
    pub amount: String,
    pub submit_for_settlement: bool,
    /// Omitted when the gateway's default merchant account should be charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_account_id: Option<String>,
}
