//! Error types for the assistant crate.
//!
//! Resolution itself never fails; unmatched input degrades to the fallback
//! response. Only the widget harness can refuse a submission.

use std::fmt;

/// Reasons the chat widget refuses a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// The input was empty after trimming.
    EmptyUtterance,
    /// A redirect is in progress and the send control is disabled.
    Busy,
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUtterance => write!(f, "utterance is empty"),
            Self::Busy => write!(f, "widget is busy with a pending action"),
        }
    }
}

impl std::error::Error for WidgetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_error_display() {
        assert!(WidgetError::EmptyUtterance.to_string().contains("empty"));
        assert!(WidgetError::Busy.to_string().contains("busy"));
    }
}
