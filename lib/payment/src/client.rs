//! HTTP client for the backend's repayment endpoints.

use crate::config::PaymentConfig;
use crate::error::PaymentError;
use crate::types::{OrderPayload, PaymentConfirmation, VerificationResult};
use async_trait::async_trait;
use plms_core::RepaymentId;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Backend operations behind the EMI payment page.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a checkout order for a repayment.
    async fn create_order(&self, repayment_id: &RepaymentId) -> Result<OrderPayload, PaymentError>;

    /// Verifies the confirmation the checkout returned.
    async fn verify_payment(
        &self,
        repayment_id: &RepaymentId,
        confirmation: &PaymentConfirmation,
    ) -> Result<VerificationResult, PaymentError>;
}

/// `reqwest`-backed [`PaymentGateway`].
#[derive(Debug, Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    api_base_url: String,
}

impl PaymentClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| PaymentError::Configuration {
                reason: format!("HTTP client error: {e}"),
            })?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path)
    }
}

#[async_trait]
impl PaymentGateway for PaymentClient {
    #[instrument(skip(self), fields(repayment_id = %repayment_id))]
    async fn create_order(&self, repayment_id: &RepaymentId) -> Result<OrderPayload, PaymentError> {
        let url = self.endpoint(&format!("repayments/create-order/{repayment_id}"));
        debug!(%url, "creating checkout order");

        let response = self.http.post(&url).send().await.map_err(|e| {
            warn!(error = %e, %url, "order request failed");
            PaymentError::order_creation(None)
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(%status, body = %body, "backend rejected order creation");
            return Err(PaymentError::order_creation(Some(&body)));
        }

        let order = OrderPayload::from_body(&body);
        if !order.is_complete() {
            warn!(body = %body, "order payload is missing the order id or amount");
        }

        info!(order_id = %order.order_id, amount = order.amount, "checkout order created");
        Ok(order)
    }

    #[instrument(skip(self, confirmation), fields(repayment_id = %repayment_id, order_id = %confirmation.order_id))]
    async fn verify_payment(
        &self,
        repayment_id: &RepaymentId,
        confirmation: &PaymentConfirmation,
    ) -> Result<VerificationResult, PaymentError> {
        let url = self.endpoint(&format!("repayments/verify-payment/{repayment_id}"));

        let response = self
            .http
            .post(&url)
            .query(&[
                ("orderId", confirmation.order_id.as_str()),
                ("paymentId", confirmation.payment_id.as_str()),
                ("signature", confirmation.signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %url, "verification request failed");
                PaymentError::verification(None)
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(%status, body = %body, "backend rejected payment verification");
            return Err(PaymentError::verification(Some(&body)));
        }

        info!("payment verified");
        Ok(VerificationResult::from_body(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ORDER_CREATION_FALLBACK, VERIFICATION_FALLBACK};
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::{StatusCode, header},
        routing::post,
    };
    use std::collections::HashMap;

    async fn serve(router: Router) -> PaymentClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        let config = PaymentConfig {
            api_base_url: format!("http://{addr}/api/"),
            ..PaymentConfig::default()
        };
        PaymentClient::new(&config).expect("client")
    }

    fn canned(status: StatusCode, body: &'static str) -> Router {
        let respond = move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) };
        Router::new()
            .route("/api/repayments/create-order/{id}", post(respond))
            .route("/api/repayments/verify-payment/{id}", post(respond))
    }

    fn confirmation() -> PaymentConfirmation {
        PaymentConfirmation {
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
            signature: "sig".to_string(),
        }
    }

    fn repayment() -> RepaymentId {
        "42".parse().expect("repayment id")
    }

    #[tokio::test]
    async fn create_order_returns_payload() {
        let router = Router::new().route(
            "/api/repayments/create-order/{id}",
            post(|Path(id): Path<String>| async move {
                Json(serde_json::json!({
                    "orderId": format!("order_for_{id}"),
                    "amount": 1_250_000,
                    "currency": "INR",
                }))
            }),
        );
        let client = serve(router).await;

        let order = client.create_order(&repayment()).await.expect("order");
        assert_eq!(order.order_id, "order_for_42");
        assert_eq!(order.amount, 1_250_000);
    }

    #[tokio::test]
    async fn create_order_accepts_decimal_amount() {
        let client = serve(canned(
            StatusCode::OK,
            r#"{"orderId":"order_1","amount":12500.0,"currency":"INR"}"#,
        ))
        .await;

        let order = client.create_order(&repayment()).await.expect("order");
        assert_eq!(order.order_id, "order_1");
        assert_eq!(order.amount, 12_500);
    }

    #[tokio::test]
    async fn create_order_succeeds_on_any_2xx_body() {
        let client = serve(canned(StatusCode::CREATED, "created")).await;

        let order = client.create_order(&repayment()).await.expect("order");
        assert!(!order.is_complete());
    }

    #[tokio::test]
    async fn create_order_surfaces_backend_message() {
        let client = serve(canned(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Repayment already paid"}"#,
        ))
        .await;

        let err = client.create_order(&repayment()).await.unwrap_err();
        assert_eq!(
            err,
            PaymentError::OrderCreationFailed {
                message: "Repayment already paid".to_string()
            }
        );
    }

    #[tokio::test]
    async fn create_order_without_message_uses_fallback() {
        let client = serve(canned(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#)).await;

        let err = client.create_order(&repayment()).await.unwrap_err();
        assert_eq!(err.message(), ORDER_CREATION_FALLBACK);
    }

    #[tokio::test]
    async fn create_order_unreachable_backend_uses_fallback() {
        let config = PaymentConfig {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_seconds: 2,
            ..PaymentConfig::default()
        };
        let client = PaymentClient::new(&config).expect("client");

        let err = client.create_order(&repayment()).await.unwrap_err();
        assert_eq!(err.message(), ORDER_CREATION_FALLBACK);
    }

    #[tokio::test]
    async fn verify_payment_sends_query_parameters() {
        let router = Router::new().route(
            "/api/repayments/verify-payment/{id}",
            post(
                |Path(id): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                    Json(serde_json::json!({
                        "status": "SUCCESS",
                        "repaymentId": id,
                        "orderId": params.get("orderId"),
                        "paymentId": params.get("paymentId"),
                        "signature": params.get("signature"),
                    }))
                },
            ),
        );
        let client = serve(router).await;

        let result = client
            .verify_payment(&repayment(), &confirmation())
            .await
            .expect("verified");
        assert_eq!(result.status.as_deref(), Some("SUCCESS"));
        assert_eq!(result.extra.get("repaymentId"), Some(&serde_json::json!("42")));
        assert_eq!(result.extra.get("orderId"), Some(&serde_json::json!("order_1")));
        assert_eq!(result.extra.get("paymentId"), Some(&serde_json::json!("pay_1")));
        assert_eq!(result.extra.get("signature"), Some(&serde_json::json!("sig")));
    }

    #[tokio::test]
    async fn verify_payment_surfaces_backend_message() {
        let client = serve(canned(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Signature mismatch"}"#,
        ))
        .await;

        let err = client
            .verify_payment(&repayment(), &confirmation())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PaymentError::PaymentVerificationFailed {
                message: "Signature mismatch".to_string()
            }
        );
    }

    #[tokio::test]
    async fn verify_payment_without_message_uses_fallback() {
        let client = serve(canned(StatusCode::BAD_GATEWAY, "")).await;

        let err = client
            .verify_payment(&repayment(), &confirmation())
            .await
            .unwrap_err();
        assert_eq!(err.message(), VERIFICATION_FALLBACK);
    }
}
