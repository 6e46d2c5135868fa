//! Session context supplied by the auth collaborator.

use serde::{Deserialize, Serialize};

/// What the widget knows about the signed-in user.
///
/// Read-only to the assistant. Passed explicitly to every resolve call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Whether the backend considers the visitor authenticated.
    pub is_logged_in: bool,
    /// Display name, when known.
    pub username: Option<String>,
}

impl SessionContext {
    /// Context for an anonymous visitor.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated user.
    #[must_use]
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            is_logged_in: true,
            username: Some(username.into()),
        }
    }

    /// Returns the username if it is set and not blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_logged_out() {
        let ctx = SessionContext::anonymous();
        assert!(!ctx.is_logged_in);
        assert_eq!(ctx.display_name(), None);
    }

    #[test]
    fn blank_username_has_no_display_name() {
        let ctx = SessionContext {
            is_logged_in: true,
            username: Some("  ".to_string()),
        };
        assert_eq!(ctx.display_name(), None);
        assert_eq!(SessionContext::logged_in("Asha").display_name(), Some("Asha"));
    }
}
