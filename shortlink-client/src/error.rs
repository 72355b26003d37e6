use thiserror::Error;

use crate::messages;

#[derive(Debug, Error)]
/// Errors of the `shortlink-client` library.
pub enum ShortlinkError {
    /// HTTP transport failure (`reqwest`), including undecodable bodies.
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// No session token, or the backend answered 401/403 without a message.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend answered 404 without a message.
    #[error("not found")]
    NotFound,

    /// Non-2xx status or `success: false`, with the backend message or the
    /// operation's fallback text.
    #[error("{0}")]
    Backend(String),
}

/// Result of `shortlink-client` operations.
pub type ShortlinkResult<T> = Result<T, ShortlinkError>;

impl ShortlinkError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Maps a failed response. A message from the body always wins; without one
    /// the status picks the variant and `fallback` fills in the text.
    pub fn from_http_status(status: u16, message: Option<String>, fallback: &str) -> Self {
        match (status, message) {
            (_, Some(message)) if !message.trim().is_empty() => Self::Backend(message),
            (401 | 403, _) => Self::Unauthorized,
            (404, _) => Self::NotFound,
            _ => Self::Backend(fallback.to_string()),
        }
    }

    /// Text to show the user. Transport failures collapse to
    /// `transport_fallback`; everything else carries its own message.
    pub fn user_message(&self, transport_fallback: &str) -> String {
        match self {
            #[cfg(feature = "http")]
            Self::Http(_) => transport_fallback.to_string(),
            Self::Validation(message) | Self::Backend(message) => message.clone(),
            Self::Unauthorized => messages::LOGIN_REQUIRED.to_string(),
            Self::NotFound => messages::NOT_FOUND.to_string(),
        }
    }

    /// `true` when the request never left the client.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
