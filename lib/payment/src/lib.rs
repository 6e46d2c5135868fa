//! Repayment checkout for the PLMS web client.
//!
//! This crate provides:
//!
//! - **Payment client**: `create_order` and `verify_payment` against the backend
//! - **Checkout types**: order payloads, checkout options and confirmations
//! - **Errors**: backend messages surfaced with generic fallbacks

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod error;
pub mod types;

#[cfg(feature = "client")]
pub use client::{PaymentClient, PaymentGateway};
pub use config::PaymentConfig;
pub use error::PaymentError;
pub use types::{CheckoutOptions, OrderPayload, PaymentConfirmation, VerificationResult};
