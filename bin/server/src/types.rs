//! Shared types used across server functions and UI components.

use plms_payment::CheckoutOptions;
use serde::{Deserialize, Serialize};

/// Everything the browser needs to open the checkout for one repayment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Normalized repayment id.
    pub repayment_id: String,
    /// Options handed to the checkout dialog.
    pub options: CheckoutOptions,
    /// URL of the checkout script to inject.
    pub script_url: String,
}

/// Outcome of a verified repayment, for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentReceipt {
    pub repayment_id: String,
    pub payment_id: String,
    pub message: String,
}
