//! Responses and the side effects they request.
//!
//! Effects are plain data. The widget harness interprets them; timers and
//! navigation are owned by whatever hosts the widget.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed navigation targets the assistant may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    PayEmi,
    ApplyLoan,
    UploadDocuments,
}

impl Route {
    /// The application path for this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::PayEmi => "/pay-emi",
            Self::ApplyLoan => "/apply-loan",
            Self::UploadDocuments => "/upload-documents",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A side effect attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Ask the router to navigate.
    Navigate { route: Route },
    /// Set or clear the transient loading flag.
    SetLoading { loading: bool },
    /// Append a bot message.
    Emit { text: String, options: Vec<String> },
    /// Run the nested effects after a delay.
    Deferred {
        delay_ms: u64,
        effects: Vec<Effect>,
    },
}

impl Effect {
    /// Navigation effect.
    #[must_use]
    pub fn navigate(route: Route) -> Self {
        Self::Navigate { route }
    }

    /// Deferred effects after `delay`.
    #[must_use]
    pub fn after(delay: Duration, effects: Vec<Effect>) -> Self {
        Self::Deferred {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            effects,
        }
    }
}

/// The assistant's answer to one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Bot message text. Empty for silent responses.
    pub text: String,
    /// Follow-up options for the next turn.
    pub options: Vec<String>,
    /// Side effects, in order.
    pub effects: Vec<Effect>,
}

impl Response {
    /// A plain text response with options.
    #[must_use]
    pub fn new<S: Into<String>>(text: impl Into<String>, options: impl IntoIterator<Item = S>) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            effects: Vec::new(),
        }
    }

    /// A response that appends no bot message and only runs effects.
    #[must_use]
    pub fn silent(effects: Vec<Effect>) -> Self {
        Self {
            text: String::new(),
            options: Vec::new(),
            effects,
        }
    }

    /// Adds an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if the widget should append a bot message for this response.
    #[must_use]
    pub fn appends_message(&self) -> bool {
        !self.text.is_empty()
    }

    /// Routes this response navigates to, including deferred ones.
    #[must_use]
    pub fn navigation_targets(&self) -> Vec<Route> {
        fn collect(effects: &[Effect], out: &mut Vec<Route>) {
            for effect in effects {
                match effect {
                    Effect::Navigate { route } => out.push(*route),
                    Effect::Deferred { effects, .. } => collect(effects, out),
                    Effect::SetLoading { .. } | Effect::Emit { .. } => {}
                }
            }
        }

        let mut routes = Vec::new();
        collect(&self.effects, &mut routes);
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_paths() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::PayEmi.path(), "/pay-emi");
        assert_eq!(Route::ApplyLoan.path(), "/apply-loan");
        assert_eq!(Route::UploadDocuments.path(), "/upload-documents");
    }

    #[test]
    fn silent_response_appends_nothing() {
        let response = Response::silent(vec![Effect::navigate(Route::Login)]);
        assert!(!response.appends_message());
        assert_eq!(response.navigation_targets(), vec![Route::Login]);
    }

    #[test]
    fn navigation_targets_include_deferred() {
        let response = Response::new("Redirecting...", Vec::<String>::new()).with_effect(
            Effect::after(
                Duration::from_millis(1500),
                vec![
                    Effect::SetLoading { loading: false },
                    Effect::navigate(Route::ApplyLoan),
                ],
            ),
        );
        assert_eq!(response.navigation_targets(), vec![Route::ApplyLoan]);
    }

    #[test]
    fn effect_serializes_tagged() {
        let json = serde_json::to_value(Effect::navigate(Route::PayEmi)).expect("serialize");
        assert_eq!(json, serde_json::json!({"type": "navigate", "route": "pay_emi"}));
    }
}
