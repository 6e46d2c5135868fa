//! Dialogue resolver: utterance + session context in, response out.

use crate::config::AssistantConfig;
use crate::context::SessionContext;
use crate::response::Response;
use crate::roster::LoanRoster;
use crate::rules::{FALLBACK_TEXT, MAIN_MENU, RuleInput, RuleTable};
use tracing::debug;

/// Maps utterances to responses using an ordered rule table.
///
/// Resolution is a pure function of the utterance and the context: the same
/// input always yields the same [`Response`].
#[derive(Debug, Clone)]
pub struct Resolver {
    rules: RuleTable,
    roster: LoanRoster,
    config: AssistantConfig,
}

impl Resolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(rules: RuleTable, roster: LoanRoster, config: AssistantConfig) -> Self {
        Self {
            rules,
            roster,
            config,
        }
    }

    /// The standard rule table over the sample roster.
    #[must_use]
    pub fn standard(config: AssistantConfig) -> Self {
        Self::new(RuleTable::standard(), LoanRoster::sample(), config)
    }

    /// Timing configuration.
    #[must_use]
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Resolves an utterance.
    ///
    /// Never fails: input no rule matches gets the fallback response.
    #[must_use]
    pub fn resolve(&self, utterance: &str, context: &SessionContext) -> Response {
        let utterance = utterance.trim();
        let normalized = utterance.to_lowercase();
        let input = RuleInput {
            utterance,
            normalized: &normalized,
            context,
            roster: &self.roster,
            redirect_delay: self.config.redirect_delay(),
        };

        match self.rules.first_match(&normalized) {
            Some(rule) => {
                debug!(
                    rule = rule.name(),
                    logged_in = context.is_logged_in,
                    "matched assistant rule"
                );
                rule.respond(&input)
            }
            None => {
                debug!("no assistant rule matched, using fallback");
                Response::new(FALLBACK_TEXT, MAIN_MENU)
            }
        }
    }

    /// Name of the rule that would answer `utterance`.
    #[must_use]
    pub fn matched_rule(&self, utterance: &str) -> Option<&'static str> {
        self.rules
            .first_match(&utterance.trim().to_lowercase())
            .map(|rule| rule.name())
    }

    /// The greeting that opens every widget session.
    #[must_use]
    pub fn greeting(&self, context: &SessionContext) -> Response {
        let name = context
            .display_name()
            .map(|name| format!(", {name}"))
            .unwrap_or_default();
        Response::new(
            format!(
                "👋 Hello{name}! I'm your PLMS Assistant. Ask me about EMIs, loan status, or documents. What would you like to do today?"
            ),
            MAIN_MENU,
        )
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::standard(AssistantConfig::default())
    }
}
