//! Form payloads posted by the HTML pages.
//!
//! Every field defaults to empty so a missing input reaches validation
//! instead of failing extraction.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

pub const MESSAGE_MAX_LEN: usize = 140;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid e-mail address."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MessageForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 140, message = "Message must be between 1 and 140 characters."))]
    pub text: String,
}

/// Profile edit. `password` confirms the change and is never stored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserEditForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid e-mail address."))]
    pub email: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub header_image_url: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().and_then(optional)
    }
}

/// Blank inputs mean "not provided".
pub fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Flatten validation failures into display strings, ordered by field name.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid.", field),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_requires_email_and_long_password() {
        let form = SignupForm {
            username: "testuser".into(),
            email: "not-an-email".into(),
            password: "abc".into(),
            image_url: String::new(),
        };

        let errors = form.validate().unwrap_err();
        let messages = error_messages(&errors);
        assert_eq!(
            messages,
            vec![
                "Enter a valid e-mail address.".to_string(),
                "Password must be at least 6 characters.".to_string(),
            ]
        );
    }

    #[test]
    fn message_text_bounds() {
        assert!(MessageForm { text: "Hello".into() }.validate().is_ok());
        assert!(MessageForm { text: String::new() }.validate().is_err());
        assert!(MessageForm { text: "x".repeat(141) }.validate().is_err());
        assert!(MessageForm { text: "x".repeat(140) }.validate().is_ok());
    }

    #[test]
    fn blank_inputs_are_absent() {
        assert_eq!(optional("   "), None);
        assert_eq!(optional(" /img.png "), Some("/img.png"));

        let query = SearchQuery { q: Some(String::new()) };
        assert_eq!(query.term(), None);
    }
}
