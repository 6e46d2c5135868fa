//! Chat widget state: message log, typing and loading flags, deferred replies.
//!
//! The widget never touches timers or the router. `submit` returns a
//! [`PendingReply`] that the host delivers after `PendingReply::delay`;
//! `deliver` and `apply_deferred` return [`WidgetCommand`]s the host executes.

use crate::config::AssistantConfig;
use crate::context::SessionContext;
use crate::error::WidgetError;
use crate::message::{Message, MessageLog};
use crate::resolver::Resolver;
use crate::response::{Effect, Response, Route};
use plms_core::ChatSessionId;
use std::time::Duration;
use tracing::debug;

/// A resolved reply waiting for its typing delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// The utterance that produced the reply.
    pub utterance: String,
    /// The resolved response.
    pub response: Response,
    /// How long the host should wait before calling [`ChatWidget::deliver`].
    pub delay: Duration,
}

/// Work the host must carry out on the widget's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    /// Navigate to a route.
    Navigate(Route),
    /// Call [`ChatWidget::apply_deferred`] with `effects` after `delay`.
    Schedule {
        delay: Duration,
        effects: Vec<Effect>,
    },
}

/// One chat widget session.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    session_id: ChatSessionId,
    resolver: Resolver,
    context: SessionContext,
    log: MessageLog,
    typing: bool,
    loading: bool,
}

impl ChatWidget {
    /// Opens a session with the standard resolver and greets the user.
    #[must_use]
    pub fn new(context: SessionContext, config: AssistantConfig) -> Self {
        Self::with_resolver(Resolver::standard(config), context)
    }

    /// Opens a session with a custom resolver.
    #[must_use]
    pub fn with_resolver(resolver: Resolver, context: SessionContext) -> Self {
        let greeting = resolver.greeting(&context);
        let mut log = MessageLog::new();
        log.push(Message::bot(greeting.text, greeting.options));

        Self {
            session_id: ChatSessionId::from_parts(
                u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default(),
                rand::random(),
            ),
            resolver,
            context,
            log,
            typing: false,
            loading: false,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn session_id(&self) -> ChatSessionId {
        self.session_id
    }

    /// Messages so far.
    #[must_use]
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Current session context.
    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Replaces the session context, e.g. after the auth state loads.
    pub fn set_context(&mut self, context: SessionContext) {
        self.context = context;
    }

    /// True while a reply is being "typed".
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// True while a redirect-style action is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a new submission would be accepted.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.typing && !self.loading
    }

    /// Submits free-typed text.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::EmptyUtterance`] for blank input and
    /// [`WidgetError::Busy`] while a reply or redirect is outstanding.
    pub fn submit(&mut self, input: &str) -> Result<PendingReply, WidgetError> {
        let delay = self
            .resolver
            .config()
            .typing_delay()
            .sample(&mut rand::rng());
        self.submit_with_delay(input, delay)
    }

    /// Submits the label of a clicked option.
    ///
    /// # Errors
    ///
    /// Same as [`ChatWidget::submit`].
    pub fn choose_option(&mut self, option: &str) -> Result<PendingReply, WidgetError> {
        self.submit(option)
    }

    /// Submits text with an explicit typing delay.
    ///
    /// # Errors
    ///
    /// Same as [`ChatWidget::submit`].
    pub fn submit_with_delay(
        &mut self,
        input: &str,
        delay: Duration,
    ) -> Result<PendingReply, WidgetError> {
        let utterance = input.trim();
        if utterance.is_empty() {
            return Err(WidgetError::EmptyUtterance);
        }
        if !self.can_send() {
            debug!(session = %self.session_id, "submission rejected while busy");
            return Err(WidgetError::Busy);
        }

        self.log.push(Message::user(utterance));
        self.typing = true;
        let response = self.resolver.resolve(utterance, &self.context);
        debug!(
            session = %self.session_id,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "reply scheduled"
        );

        Ok(PendingReply {
            utterance: utterance.to_string(),
            response,
            delay,
        })
    }

    /// Delivers a reply whose typing delay has elapsed.
    pub fn deliver(&mut self, pending: PendingReply) -> Vec<WidgetCommand> {
        self.typing = false;
        let PendingReply { response, .. } = pending;
        if response.appends_message() {
            self.log.push(Message::bot(response.text, response.options));
        }
        self.run_effects(response.effects)
    }

    /// Runs effects whose scheduled delay has elapsed.
    pub fn apply_deferred(&mut self, effects: Vec<Effect>) -> Vec<WidgetCommand> {
        self.run_effects(effects)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Vec<WidgetCommand> {
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                Effect::SetLoading { loading } => self.loading = loading,
                Effect::Emit { text, options } => self.log.push(Message::bot(text, options)),
                Effect::Navigate { route } => {
                    debug!(session = %self.session_id, %route, "navigation requested");
                    commands.push(WidgetCommand::Navigate(route));
                }
                Effect::Deferred { delay_ms, effects } => commands.push(WidgetCommand::Schedule {
                    delay: Duration::from_millis(delay_ms),
                    effects,
                }),
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;
    use crate::rules::MAIN_MENU;

    fn widget(context: SessionContext) -> ChatWidget {
        ChatWidget::new(context, AssistantConfig::default())
    }

    #[test]
    fn new_widget_greets_with_main_menu() {
        let w = widget(SessionContext::logged_in("Ravi"));
        assert_eq!(w.log().len(), 1);
        let greeting = &w.log().messages()[0];
        assert_eq!(greeting.sender, Sender::Bot);
        assert!(greeting.text.contains("Hello, Ravi!"));
        assert_eq!(greeting.options.len(), MAIN_MENU.len());
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut w = widget(SessionContext::anonymous());
        assert_eq!(w.submit("   ").unwrap_err(), WidgetError::EmptyUtterance);
        assert_eq!(w.log().len(), 1);
        assert!(!w.is_typing());
    }

    #[test]
    fn submit_then_deliver_appends_both_sides() {
        let mut w = widget(SessionContext::anonymous());
        let pending = w.submit("  thanks  ").expect("accepted");

        assert!(pending.delay >= Duration::from_millis(1000));
        assert!(pending.delay <= Duration::from_millis(1400));
        assert!(w.is_typing());
        assert_eq!(w.log().last().map(|m| m.text.as_str()), Some("thanks"));

        let commands = w.deliver(pending);
        assert!(commands.is_empty());
        assert!(!w.is_typing());
        assert_eq!(w.log().len(), 3);
        assert_eq!(w.log().last().map(|m| m.sender), Some(Sender::Bot));
    }

    #[test]
    fn busy_while_typing() {
        let mut w = widget(SessionContext::anonymous());
        let _pending = w.submit("hi").expect("accepted");
        assert_eq!(w.submit("hello").unwrap_err(), WidgetError::Busy);
    }

    #[test]
    fn busy_while_redirect_is_loading() {
        let mut w = widget(SessionContext::logged_in("Ravi"));
        let pending = w
            .submit_with_delay("Pay EMI", Duration::ZERO)
            .expect("accepted");
        let commands = w.deliver(pending);
        assert!(w.is_loading());
        assert!(!w.is_typing());
        let before = w.log().len();

        assert_eq!(w.submit("hi").unwrap_err(), WidgetError::Busy);
        assert_eq!(w.choose_option("Login").unwrap_err(), WidgetError::Busy);
        assert_eq!(w.log().len(), before);

        let [WidgetCommand::Schedule { effects, .. }] = commands.as_slice() else {
            panic!("expected one scheduled task, got {commands:?}");
        };
        w.apply_deferred(effects.clone());
        assert!(w.submit("hi").is_ok());
    }

    #[test]
    fn pay_emi_flow_runs_deferred_effects() {
        let mut w = widget(SessionContext::logged_in("Ravi"));
        let pending = w
            .submit_with_delay("Pay EMI", Duration::ZERO)
            .expect("accepted");

        let commands = w.deliver(pending);
        assert!(w.is_loading());
        assert!(!w.can_send());
        assert_eq!(
            w.log().last().map(|m| m.text.as_str()),
            Some("Initiating payment session...")
        );

        let [WidgetCommand::Schedule { delay, effects }] = commands.as_slice() else {
            panic!("expected one scheduled task, got {commands:?}");
        };
        assert_eq!(*delay, Duration::from_millis(1500));

        let follow_up = w.apply_deferred(effects.clone());
        assert!(!w.is_loading());
        assert_eq!(follow_up, vec![WidgetCommand::Navigate(Route::PayEmi)]);
        let last = w.log().last().expect("message");
        assert!(last.text.contains("EMI payment portal"));
        assert_eq!(last.options, vec!["Back to Main Menu".to_string()]);
    }

    #[test]
    fn login_navigates_without_bot_message() {
        let mut w = widget(SessionContext::anonymous());
        let pending = w.choose_option("Login").expect("accepted");
        let before = w.log().len();

        let commands = w.deliver(pending);
        assert_eq!(commands, vec![WidgetCommand::Navigate(Route::Login)]);
        assert_eq!(w.log().len(), before);
    }

    #[test]
    fn context_update_changes_gating() {
        let mut w = widget(SessionContext::anonymous());
        let pending = w
            .submit_with_delay("Apply for a New Loan", Duration::ZERO)
            .expect("accepted");
        assert!(pending.response.text.contains("log in"));
        w.deliver(pending);

        w.set_context(SessionContext::logged_in("Ravi"));
        let pending = w
            .submit_with_delay("Apply for a New Loan", Duration::ZERO)
            .expect("accepted");
        assert_eq!(pending.response.navigation_targets(), vec![Route::ApplyLoan]);
    }
}
