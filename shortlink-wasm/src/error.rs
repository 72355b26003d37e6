use std::fmt;

use shortlink_client::messages;

#[derive(Debug, Clone, PartialEq)]
/// Failure of a browser API call.
pub(crate) enum ApiError {
    /// The request never got an answer (offline, CORS, DNS...).
    Network(String),
    /// Non-2xx status or `success: false`; `message` is already what the user sees.
    Http { status: u16, message: String },
    /// The body was not the expected JSON.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "{msg}"),
            Self::Http { message, .. } => write!(f, "{message}"),
            Self::Decode(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl ApiError {
    /// Builds the `Http` variant: a non-blank backend message wins, then
    /// 401/403 ask for a login, then `fallback`.
    pub(crate) fn http(status: u16, message: Option<String>, fallback: &str) -> Self {
        let message = match (status, message) {
            (_, Some(message)) if !message.trim().is_empty() => message,
            (401 | 403, _) => messages::LOGIN_REQUIRED.to_string(),
            _ => fallback.to_string(),
        };
        Self::Http { status, message }
    }

    /// Text for the page. Transport and decode failures become `transport_fallback`.
    pub(crate) fn user_message(&self, transport_fallback: &str) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Network(_) | Self::Decode(_) => transport_fallback.to_string(),
        }
    }
}
