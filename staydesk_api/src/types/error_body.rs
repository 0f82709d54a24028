//! Structured body carried by non-2xx responses.

use serde::{Deserialize, Serialize};

/// Error body shape shared by every endpoint. All parts are optional;
/// transport failures carry no body at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    /// Field validation errors, if the body carries a non-empty list.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        self.errors.as_deref().filter(|errors| !errors.is_empty())
    }
}

/// One rejected form field. `message` is a translation key, not
/// display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
