//! Chat messages and the append-only message log.

use chrono::{DateTime, Utc};
use plms_core::MessageId;
use serde::{Deserialize, Serialize};

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The assistant.
    Bot,
}

/// A message in the chat widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Who sent the message.
    pub sender: Sender,
    /// Message text. May contain newlines.
    pub text: String,
    /// Follow-up options rendered as buttons. Always empty for user messages.
    pub options: Vec<String>,
    /// When the message was appended.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        let sent_at = Utc::now();
        Self {
            id: mint_id(sent_at),
            sender: Sender::User,
            text: text.into(),
            options: Vec::new(),
            sent_at,
        }
    }

    /// Creates a bot message with follow-up options.
    #[must_use]
    pub fn bot(text: impl Into<String>, options: Vec<String>) -> Self {
        let sent_at = Utc::now();
        Self {
            id: mint_id(sent_at),
            sender: Sender::Bot,
            text: text.into(),
            options,
            sent_at,
        }
    }

    /// Returns true if this message offers clickable options.
    #[must_use]
    pub fn has_options(&self) -> bool {
        self.sender == Sender::Bot && !self.options.is_empty()
    }
}

// chrono's clock works in the browser; `Ulid::new` does not.
fn mint_id(at: DateTime<Utc>) -> MessageId {
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or_default();
    MessageId::from_parts(millis, rand::random())
}

/// Ordered, append-only log of the messages of one widget session.
///
/// Messages cannot be edited or removed once appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns all messages in order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the options of the most recent bot message.
    #[must_use]
    pub fn current_options(&self) -> &[String] {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Bot)
            .map(|m| m.options.as_slice())
            .unwrap_or_default()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the log holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_carry_no_options() {
        let msg = Message::user("Pay EMI");
        assert_eq!(msg.sender, Sender::User);
        assert!(!msg.has_options());
    }

    #[test]
    fn log_preserves_order() {
        let mut log = MessageLog::new();
        log.push(Message::user("hello"));
        log.push(Message::bot("hi", vec!["Back to Main Menu".to_string()]));

        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].text, "hello");
        assert_eq!(log.last().map(|m| m.sender), Some(Sender::Bot));
    }

    #[test]
    fn current_options_skip_trailing_user_messages() {
        let mut log = MessageLog::new();
        log.push(Message::bot("menu", vec!["Pay EMI".to_string()]));
        log.push(Message::user("Pay EMI"));

        assert_eq!(log.current_options(), ["Pay EMI".to_string()]);
    }

    #[test]
    fn sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Bot).expect("serialize");
        assert_eq!(json, "\"bot\"");
    }
}
