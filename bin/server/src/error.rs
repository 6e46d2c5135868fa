//! Domain error types for server operations.
//!
//! Each enum keeps the details for logging and converts into a user-safe
//! `ServerFnError` with `into_server_error`.

use leptos::server_fn::error::ServerFnError;
use plms_payment::PaymentError;
use std::fmt;

/// Errors from the EMI payment server functions.
#[derive(Debug)]
pub enum CheckoutError {
    /// The repayment id was empty or malformed.
    InvalidRepaymentId { raw: String, reason: String },
    /// The payment client is not installed on the request.
    Unavailable { details: String },
    /// The backend or the checkout configuration rejected the operation.
    Payment(PaymentError),
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRepaymentId { raw, reason } => {
                write!(f, "invalid repayment id '{}': {}", raw, reason)
            }
            Self::Unavailable { details } => {
                write!(f, "payment service unavailable: {}", details)
            }
            Self::Payment(e) => write!(f, "{}", e),
        }
    }
}

impl From<PaymentError> for CheckoutError {
    fn from(e: PaymentError) -> Self {
        Self::Payment(e)
    }
}

impl CheckoutError {
    /// Convert to a user-safe ServerFnError.
    ///
    /// Backend failures keep their message, which is either the backend's own
    /// explanation or the generic text.
    pub fn into_server_error(self) -> ServerFnError {
        match self {
            CheckoutError::InvalidRepaymentId { .. } => {
                ServerFnError::new("Please enter a valid repayment ID")
            }
            CheckoutError::Unavailable { .. } => {
                ServerFnError::new("Payment service unavailable")
            }
            CheckoutError::Payment(PaymentError::Configuration { .. }) => {
                ServerFnError::new("Online payment is not configured")
            }
            CheckoutError::Payment(e) => ServerFnError::new(e.message()),
        }
    }
}

/// The text to show for a failed server function call.
pub fn user_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(error: CheckoutError) -> String {
        user_message(&error.into_server_error())
    }

    #[test]
    fn backend_message_reaches_the_user() {
        let err = CheckoutError::from(PaymentError::order_creation(Some(
            r#"{"message":"Repayment already paid"}"#,
        )));
        assert_eq!(message_of(err), "Repayment already paid");
    }

    #[test]
    fn generic_messages_are_kept() {
        assert_eq!(
            message_of(PaymentError::order_creation(None).into()),
            "Failed to create order"
        );
        assert_eq!(
            message_of(PaymentError::verification(None).into()),
            "Payment verification failed"
        );
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = CheckoutError::Unavailable {
            details: "missing extension".to_string(),
        };
        assert!(err.to_string().contains("missing extension"));
        assert_eq!(message_of(err), "Payment service unavailable");

        let err = CheckoutError::Payment(PaymentError::Configuration {
            reason: "no checkout key configured".to_string(),
        });
        assert_eq!(message_of(err), "Online payment is not configured");
    }
}
