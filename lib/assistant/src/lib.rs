//! PLMS Assistant: the rule-based chat widget of the PLMS web client.
//!
//! This crate provides:
//!
//! - **Resolver**: an ordered rule table mapping utterances to canned responses
//! - **Effects**: navigation, loading flag and deferred follow-ups as data
//! - **Chat widget**: the message log plus the typing-delay harness

pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod resolver;
pub mod response;
pub mod roster;
pub mod rules;
pub mod widget;

pub use config::{AssistantConfig, TypingDelay};
pub use context::SessionContext;
pub use error::WidgetError;
pub use message::{Message, MessageLog, Sender};
pub use resolver::Resolver;
pub use response::{Effect, Response, Route};
pub use roster::{LoanRecord, LoanRoster};
pub use rules::{Rule, RuleTable};
pub use widget::{ChatWidget, PendingReply, WidgetCommand};
