//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (e.g. `PAYMENT__API_BASE_URL`).
//!
//! See [`PaymentConfig`] and [`AssistantConfig`] for the library settings.

use plms_assistant::AssistantConfig;
use plms_payment::PaymentConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Backend and checkout settings.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Chat widget timing.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Names of the cookies the backend sets at login.
    #[serde(default)]
    pub auth: AuthCookieConfig,
}

/// Cookie names for the backend-issued session.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthCookieConfig {
    /// Cookie holding the bearer token. Its presence means "logged in".
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,

    /// Cookie holding the display name.
    #[serde(default = "default_username_cookie")]
    pub username_cookie: String,
}

fn default_token_cookie() -> String {
    "token".to_string()
}

fn default_username_cookie() -> String {
    "username".to_string()
}

impl Default for AuthCookieConfig {
    fn default() -> Self {
        Self {
            token_cookie: default_token_cookie(),
            username_cookie: default_username_cookie(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> plms_core::Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_config_has_correct_defaults() {
        let config = AuthCookieConfig::default();
        assert_eq!(config.token_cookie, "token");
        assert_eq!(config.username_cookie, "username");
    }

    #[test]
    fn empty_source_falls_back_to_defaults() {
        let config: ServerConfig = config::Config::builder()
            .build()
            .and_then(config::Config::try_deserialize)
            .expect("deserialize");
        assert_eq!(config.payment.api_base_url, "http://localhost:8732/api");
        assert_eq!(config.assistant.redirect_delay_ms, 1500);
        assert_eq!(config.auth.token_cookie, "token");
    }

    #[test]
    fn nested_keys_override_defaults() {
        let config: ServerConfig = config::Config::builder()
            .set_override("payment.checkout_key", "rzp_test_1")
            .and_then(|b| b.set_override("assistant.typing_delay_min_ms", 200))
            .and_then(config::ConfigBuilder::build)
            .and_then(config::Config::try_deserialize)
            .expect("deserialize");
        assert_eq!(config.payment.checkout_key.as_deref(), Some("rzp_test_1"));
        assert_eq!(config.assistant.typing_delay_min_ms, 200);
        assert_eq!(config.assistant.typing_delay_jitter_ms, 400);
    }
}
