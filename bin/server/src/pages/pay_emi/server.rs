//! EMI payment server functions.
//!
//! Both functions call the backend through the [`PaymentGateway`] installed
//! as a request extension.
//!
//! [`PaymentGateway`]: plms_payment::PaymentGateway

use crate::types::{CheckoutSession, RepaymentReceipt};
use leptos::prelude::*;

/// Server function to create a checkout order for a repayment.
#[server]
pub async fn create_payment_order(repayment_id: String) -> Result<CheckoutSession, ServerFnError> {
    use crate::error::CheckoutError;
    use plms_payment::CheckoutOptions;

    let id = parse_repayment_id(&repayment_id).map_err(CheckoutError::into_server_error)?;
    let (gateway, config) = payment_services().await.map_err(|e| {
        tracing::error!(error = %e, "Payment client missing from request");
        e.into_server_error()
    })?;

    let order = gateway.create_order(&id).await.map_err(|e| {
        tracing::warn!(error = %e, repayment_id = %id, "Order creation failed");
        CheckoutError::from(e).into_server_error()
    })?;

    let options = CheckoutOptions::for_order(
        &id,
        &order,
        config.checkout_key.as_deref(),
        &config.merchant_name,
    )
    .map_err(|e| {
        tracing::error!(error = %e, repayment_id = %id, "Checkout cannot be opened");
        CheckoutError::from(e).into_server_error()
    })?;

    Ok(CheckoutSession {
        repayment_id: id.to_string(),
        options,
        script_url: config.checkout_script_url,
    })
}

/// Server function to verify a completed checkout with the backend.
#[server]
pub async fn verify_repayment(
    repayment_id: String,
    order_id: String,
    payment_id: String,
    signature: String,
) -> Result<RepaymentReceipt, ServerFnError> {
    use crate::error::CheckoutError;
    use plms_payment::PaymentConfirmation;

    let id = parse_repayment_id(&repayment_id).map_err(CheckoutError::into_server_error)?;
    let (gateway, _) = payment_services().await.map_err(|e| {
        tracing::error!(error = %e, "Payment client missing from request");
        e.into_server_error()
    })?;

    let confirmation = PaymentConfirmation {
        order_id,
        payment_id,
        signature,
    };
    let result = gateway
        .verify_payment(&id, &confirmation)
        .await
        .map_err(|e| {
            tracing::warn!(
                error = %e,
                repayment_id = %id,
                order_id = %confirmation.order_id,
                "Payment verification failed"
            );
            CheckoutError::from(e).into_server_error()
        })?;

    tracing::info!(repayment_id = %id, payment_id = %confirmation.payment_id, "Repayment verified");

    Ok(RepaymentReceipt {
        repayment_id: id.to_string(),
        payment_id: confirmation.payment_id,
        message: result
            .message
            .unwrap_or_else(|| "Payment successful".to_string()),
    })
}

#[cfg(feature = "ssr")]
fn parse_repayment_id(
    raw: &str,
) -> Result<plms_core::RepaymentId, crate::error::CheckoutError> {
    raw.parse()
        .map_err(|e: plms_core::ParseIdError| crate::error::CheckoutError::InvalidRepaymentId {
            raw: raw.to_string(),
            reason: e.reason,
        })
}

#[cfg(feature = "ssr")]
async fn payment_services() -> Result<
    (
        std::sync::Arc<dyn plms_payment::PaymentGateway>,
        plms_payment::PaymentConfig,
    ),
    crate::error::CheckoutError,
> {
    use crate::error::CheckoutError;
    use axum::Extension;

    let Extension(gateway) =
        leptos_axum::extract::<Extension<std::sync::Arc<dyn plms_payment::PaymentGateway>>>()
            .await
            .map_err(|e| CheckoutError::Unavailable {
                details: e.to_string(),
            })?;
    let Extension(config) = leptos_axum::extract::<Extension<plms_payment::PaymentConfig>>()
        .await
        .map_err(|e| CheckoutError::Unavailable {
            details: e.to_string(),
        })?;
    Ok((gateway, config))
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use crate::error::CheckoutError;

    #[test]
    fn repayment_id_is_trimmed() {
        let id = parse_repayment_id("  1042 ").expect("valid");
        assert_eq!(id.as_str(), "1042");
    }

    #[test]
    fn malformed_repayment_id_is_rejected() {
        for raw in ["", "   ", "12/34"] {
            let err = parse_repayment_id(raw).unwrap_err();
            assert!(matches!(err, CheckoutError::InvalidRepaymentId { .. }), "{raw:?}");
        }
    }
}
