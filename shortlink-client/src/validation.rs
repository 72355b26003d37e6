//! Client-side form checks. A failed check never reaches the network.

use url::Url;
use validator::{Validate, ValidationErrors};

use crate::error::{ShortlinkError, ShortlinkResult};
use crate::messages;

/// Checks the shorten/edit input and returns the URL to send.
///
/// Accepts anything the WHATWG parser takes as an absolute URL.
pub fn validate_shorten_url(input: &str) -> ShortlinkResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ShortlinkError::validation(messages::EMPTY_URL));
    }

    Url::parse(input).map_err(|_| ShortlinkError::validation(messages::INVALID_URL))?;
    Ok(input.to_string())
}

#[derive(Debug, Clone, Default)]
/// Sign-in form.
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn check(&self) -> ShortlinkResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ShortlinkError::validation(messages::FILL_ALL_FIELDS));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Validate)]
/// Sign-up form, including the fields that never leave the client.
pub struct RegisterForm {
    pub username: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
}

impl RegisterForm {
    /// Runs the checks in the order the form reports them: required fields,
    /// password confirmation, terms, then the email format. Password policy
    /// is the backend's call.
    pub fn check(&self) -> ShortlinkResult<()> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ShortlinkError::validation(messages::FILL_ALL_FIELDS));
        }

        if self.password != self.confirm_password {
            return Err(ShortlinkError::validation(messages::PASSWORD_MISMATCH));
        }

        if !self.agree_terms {
            return Err(ShortlinkError::validation(messages::TERMS_REQUIRED));
        }

        self.validate()
            .map_err(|errors| ShortlinkError::validation(first_message(&errors)))
    }
}

/// Username edit on the settings page.
pub fn validate_username(input: &str) -> ShortlinkResult<String> {
    let username = input.trim();
    if username.is_empty() {
        return Err(ShortlinkError::validation(messages::USERNAME_REQUIRED));
    }
    Ok(username.to_string())
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .get("email")
        .and_then(|errs| errs.iter().find_map(|err| err.message.as_ref()))
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| messages::FILL_ALL_FIELDS.to_string())
}
