//! Payment collaborator configuration.

use serde::{Deserialize, Serialize};

/// Where the backend and the checkout SDK live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the backend REST API, without trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// URL of the external checkout script injected into the page.
    #[serde(default = "default_checkout_script_url")]
    pub checkout_script_url: String,

    /// Publishable checkout key, used when the order payload carries none.
    #[serde(default)]
    pub checkout_key: Option<String>,

    /// Merchant name shown in the checkout dialog.
    #[serde(default = "default_merchant_name")]
    pub merchant_name: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8732/api".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    10
}

fn default_checkout_script_url() -> String {
    "https://checkout.razorpay.com/v1/checkout.js".to_string()
}

fn default_merchant_name() -> String {
    "PLMS".to_string()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            checkout_script_url: default_checkout_script_url(),
            checkout_key: None,
            merchant_name: default_merchant_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_config_has_correct_defaults() {
        let config = PaymentConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8732/api");
        assert_eq!(config.request_timeout_seconds, 10);
        assert!(config.checkout_script_url.ends_with("/v1/checkout.js"));
        assert!(config.checkout_key.is_none());
    }

    #[test]
    fn partial_config_deserializes() {
        let config: PaymentConfig =
            serde_json::from_str(r#"{"checkout_key":"rzp_test_1"}"#).expect("deserialize");
        assert_eq!(config.checkout_key.as_deref(), Some("rzp_test_1"));
        assert_eq!(config.merchant_name, "PLMS");
    }
}
