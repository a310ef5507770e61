use serde::{Deserialize, Serialize};

/// Bootstrap alert class a flash message is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Danger => "danger",
        }
    }
}

/// A one-shot message carried in the session until the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(message: impl Into<String>, category: FlashCategory) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, FlashCategory::Danger)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, FlashCategory::Success)
    }
}
