//! Error types for the payment crate.
//!
//! Each failure carries a human-readable message. When the backend answers
//! with a JSON body whose `message` is set (not null, false, zero or empty),
//! that value is used as-is; otherwise a fixed generic message is.

use serde_json::Value;
use std::fmt;

/// Generic message when order creation fails without a backend explanation.
pub const ORDER_CREATION_FALLBACK: &str = "Failed to create order";

/// Generic message when verification fails without a backend explanation.
pub const VERIFICATION_FALLBACK: &str = "Payment verification failed";

/// Errors from payment operations. Never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The backend did not create a checkout order.
    OrderCreationFailed { message: String },
    /// The backend did not accept the payment confirmation.
    PaymentVerificationFailed { message: String },
    /// The client could not be set up or checkout is not configured.
    Configuration { reason: String },
}

impl PaymentError {
    /// Order creation failure from an optional backend error body.
    #[must_use]
    pub fn order_creation(body: Option<&str>) -> Self {
        Self::OrderCreationFailed {
            message: body
                .and_then(backend_message)
                .unwrap_or_else(|| ORDER_CREATION_FALLBACK.to_string()),
        }
    }

    /// Verification failure from an optional backend error body.
    #[must_use]
    pub fn verification(body: Option<&str>) -> Self {
        Self::PaymentVerificationFailed {
            message: body
                .and_then(backend_message)
                .unwrap_or_else(|| VERIFICATION_FALLBACK.to_string()),
        }
    }

    /// The message to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::OrderCreationFailed { message } | Self::PaymentVerificationFailed { message } => {
                message
            }
            Self::Configuration { reason } => reason,
        }
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderCreationFailed { message } => {
                write!(f, "order creation failed: {message}")
            }
            Self::PaymentVerificationFailed { message } => {
                write!(f, "payment verification failed: {message}")
            }
            Self::Configuration { reason } => {
                write!(f, "payment configuration error: {reason}")
            }
        }
    }
}

impl std::error::Error for PaymentError {}

/// Extracts the `message` field of a JSON error body.
///
/// Strings are returned untouched. Other set values are rendered as JSON text.
#[must_use]
pub fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
