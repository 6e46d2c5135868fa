//! Strongly-typed identifiers.
//!
//! Identifiers minted on the client (messages, chat sessions) are ULIDs with a
//! display prefix. Identifiers issued by the backend (loans, repayments) are
//! opaque strings wrapped in their own types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed ID wrapper around ULID.
macro_rules! define_ulid_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates an ID from a millisecond timestamp and random bits.
            ///
            /// There is no clock-based constructor: the system clock is
            /// unavailable in the browser, so callers supply the timestamp.
            #[must_use]
            pub fn from_parts(timestamp_ms: u64, random: u128) -> Self {
                Self(Ulid::from_parts(timestamp_ms, random))
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ulid::from_str(raw).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    reason: e.to_string(),
                })
            }
        }
    };
}

define_ulid_id!(
    /// Unique identifier for a message in the chat widget log.
    MessageId,
    "msg"
);

define_ulid_id!(
    /// Unique identifier for one chat widget session (one page load).
    ChatSessionId,
    "chat"
);

/// Identifier of a loan, e.g. `LN12345`.
///
/// Loan ids are case-insensitive; the stored form is always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(String);

impl LoanId {
    /// Creates a loan id, normalizing it to upper case.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Returns the normalized id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a scheduled repayment, as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepaymentId(String);

impl RepaymentId {
    /// Returns the id as it appears in backend URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepaymentId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                id_type: "RepaymentId",
                reason: "empty identifier".to_string(),
            });
        }
        if trimmed.contains(['/', '?', '#']) || trimmed.contains(char::is_whitespace) {
            return Err(ParseIdError {
                id_type: "RepaymentId",
                reason: format!("'{trimmed}' is not a valid path segment"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_display_format() {
        let id = MessageId::from_parts(1_700_000_000_000, 7);
        assert!(id.to_string().starts_with("msg_"));
    }

    #[test]
    fn chat_session_id_parses_with_and_without_prefix() {
        let id = ChatSessionId::from_parts(1_700_000_000_000, u128::MAX >> 48);
        let with_prefix: ChatSessionId = id.to_string().parse().expect("should parse");
        let bare: ChatSessionId = id.as_ulid().to_string().parse().expect("should parse");
        assert_eq!(id, with_prefix);
        assert_eq!(id, bare);
    }

    #[test]
    fn ids_from_parts_keep_timestamp() {
        let id = MessageId::from_parts(1_700_000_000_000, 42);
        assert_eq!(id.as_ulid().timestamp_ms(), 1_700_000_000_000);
        assert_eq!(id, MessageId::from_parts(1_700_000_000_000, 42));
    }

    #[test]
    fn parse_invalid_ulid() {
        let err = "msg_nope".parse::<MessageId>().unwrap_err();
        assert_eq!(err.id_type, "MessageId");
    }

    #[test]
    fn loan_id_is_upper_cased() {
        let id = LoanId::new(" ln12345 ");
        assert_eq!(id.as_str(), "LN12345");
        assert_eq!(id, LoanId::new("LN12345"));
    }

    #[test]
    fn repayment_id_rejects_empty_and_path_characters() {
        assert!("".parse::<RepaymentId>().is_err());
        assert!("   ".parse::<RepaymentId>().is_err());
        assert!("12/34".parse::<RepaymentId>().is_err());
        assert!("12 34".parse::<RepaymentId>().is_err());

        let id: RepaymentId = " 42 ".parse().expect("should parse");
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn repayment_id_serializes_transparently() {
        let id: RepaymentId = "rp_7".parse().expect("should parse");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"rp_7\"");
    }
}
