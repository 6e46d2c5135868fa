//! Session and widget settings server functions.
//!
//! Authentication itself belongs to the backend. The server only reads the
//! cookies the backend sets at login.

use leptos::prelude::*;
use plms_assistant::{AssistantConfig, SessionContext};

/// Server function to get the session context of the current request.
///
/// A request without the token cookie is anonymous. Failures to read the
/// request also yield an anonymous context.
#[server]
pub async fn get_session_context() -> Result<SessionContext, ServerFnError> {
    use crate::config::AuthCookieConfig;
    use axum::Extension;
    use axum_extra::extract::CookieJar;

    let Extension(cookies): Extension<AuthCookieConfig> = leptos_axum::extract().await?;
    let jar = match leptos_axum::extract::<CookieJar>().await {
        Ok(jar) => jar,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to extract cookie jar");
            return Ok(SessionContext::anonymous());
        }
    };

    Ok(session_from_cookies(
        jar.get(&cookies.token_cookie).map(|c| c.value()),
        jar.get(&cookies.username_cookie).map(|c| c.value()),
    ))
}

/// Server function to get the widget timing configuration.
#[server]
pub async fn get_assistant_settings() -> Result<AssistantConfig, ServerFnError> {
    use axum::Extension;

    let Extension(config): Extension<AssistantConfig> = leptos_axum::extract().await?;
    Ok(config)
}

/// Builds the session context from raw cookie values.
pub fn session_from_cookies(token: Option<&str>, username: Option<&str>) -> SessionContext {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => match username.map(str::trim) {
            Some(name) if !name.is_empty() => SessionContext::logged_in(name),
            _ => SessionContext {
                is_logged_in: true,
                username: None,
            },
        },
        _ => SessionContext::anonymous(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cookie_means_logged_in() {
        let ctx = session_from_cookies(Some("jwt"), Some("Ravi"));
        assert!(ctx.is_logged_in);
        assert_eq!(ctx.username.as_deref(), Some("Ravi"));
    }

    #[test]
    fn missing_or_blank_token_is_anonymous() {
        assert_eq!(session_from_cookies(None, Some("Ravi")), SessionContext::anonymous());
        assert_eq!(session_from_cookies(Some("  "), None), SessionContext::anonymous());
    }

    #[test]
    fn blank_username_is_dropped() {
        let ctx = session_from_cookies(Some("jwt"), Some(" "));
        assert!(ctx.is_logged_in);
        assert_eq!(ctx.username, None);
    }
}
