//! Checkout data exchanged with the backend and the checkout SDK.

use crate::error::PaymentError;
use plms_core::RepaymentId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Order created by the backend for one repayment.
///
/// Decoding is lenient: a successful response is never turned into an error
/// because a field is missing or shaped differently. Gaps surface when the
/// checkout options are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Gateway order id. Empty if the backend sent none.
    #[serde(default, alias = "id", alias = "razorpayOrderId")]
    pub order_id: String,
    /// Amount in the smallest currency unit (paise). Decimal values are
    /// rounded; missing or non-numeric values read as zero.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Publishable key, when the backend includes one.
    #[serde(default, alias = "key", alias = "razorpayKeyId")]
    pub key_id: Option<String>,
    /// Any further fields the backend sends.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    let amount = match &value {
        JsonValue::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(round_amount)),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().and_then(round_amount),
        _ => None,
    };
    Ok(amount.unwrap_or_default())
}

fn round_amount(amount: f64) -> Option<u64> {
    (amount.is_finite() && amount >= 0.0 && amount <= u64::MAX as f64)
        .then(|| amount.round() as u64)
}

impl Default for OrderPayload {
    fn default() -> Self {
        Self {
            order_id: String::new(),
            amount: 0,
            currency: default_currency(),
            key_id: None,
            extra: Map::new(),
        }
    }
}

impl OrderPayload {
    /// Interprets a successful response body.
    ///
    /// Bodies that are not a JSON object yield an empty payload.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body.trim()).unwrap_or_default()
    }

    /// True if the payload carries what the checkout needs.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.order_id.trim().is_empty() && self.amount > 0
    }
}

/// The identifiers the checkout hands back after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    #[serde(alias = "razorpay_order_id", alias = "orderId")]
    pub order_id: String,
    #[serde(alias = "razorpay_payment_id", alias = "paymentId")]
    pub payment_id: String,
    #[serde(alias = "razorpay_signature")]
    pub signature: String,
}

/// The backend's answer to a verification request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl VerificationResult {
    /// Interprets a successful response body. Non-JSON bodies become the message.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        serde_json::from_str(trimmed).unwrap_or_else(|_| Self {
            message: Some(trimmed.to_string()),
            ..Self::default()
        })
    }
}

/// Options passed to the checkout dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub theme: CheckoutTheme,
}

/// Checkout dialog colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTheme {
    pub color: String,
}

impl CheckoutOptions {
    /// Builds checkout options for an order.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::OrderCreationFailed`] with the generic message
    /// if the order lacks an id or an amount, and
    /// [`PaymentError::Configuration`] if neither the order nor the
    /// configuration provides a publishable key.
    pub fn for_order(
        repayment_id: &RepaymentId,
        order: &OrderPayload,
        fallback_key: Option<&str>,
        merchant_name: &str,
    ) -> Result<Self, PaymentError> {
        if !order.is_complete() {
            return Err(PaymentError::order_creation(None));
        }
        let key = order
            .key_id
            .as_deref()
            .or(fallback_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PaymentError::Configuration {
                reason: "no checkout key configured".to_string(),
            })?;

        Ok(Self {
            key: key.to_string(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: merchant_name.to_string(),
            description: format!("EMI repayment {repayment_id}"),
            order_id: order.order_id.clone(),
            theme: CheckoutTheme {
                color: "#1a73e8".to_string(),
            },
        })
    }
}
