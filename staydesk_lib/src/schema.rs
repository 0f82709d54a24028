//! Form schemas: per-field validators producing normalized JSON values.
//!
//! Every field check first treats trimmed-empty input as absent, so an
//! untouched required date/number/select field reports `required` instead
//! of a type error. Message keys are fixed when the schema is built; there
//! is no shared validator state between forms.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use uuid::Uuid;

use staydesk_api::types::FieldError;

/// Base validator: non-empty input to a normalized JSON value, or a
/// message key.
pub type Validator = Box<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Validator over possibly-absent input, produced by [`empty_to_null`].
pub type Normalized = Box<dyn Fn(Option<&str>) -> Result<Value, String> + Send + Sync>;

/// Wraps a base validator so that absent or trimmed-empty input becomes an
/// explicit null before any other check runs.
pub fn empty_to_null(validator: Validator) -> Normalized {
    Box::new(move |raw| {
        match raw.map(str::trim).filter(|trimmed| !trimmed.is_empty()) {
            None => Ok(Value::Null),
            Some(trimmed) => validator(trimmed),
        }
    })
}

/// An ISO date (`2024-09-12`), normalized to a JSON string.
pub fn date() -> Validator {
    Box::new(|raw| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|parsed| Value::String(parsed.to_string()))
            .map_err(|_| "invalid.date".to_string())
    })
}

/// A whole number, normalized to a JSON number.
pub fn integer() -> Validator {
    Box::new(|raw| {
        raw.parse::<i64>()
            .map(Value::from)
            .map_err(|_| "invalid.number".to_string())
    })
}

/// A UUID, normalized to its canonical string form.
pub fn uuid() -> Validator {
    Box::new(|raw| {
        raw.parse::<Uuid>()
            .map(|parsed| Value::String(parsed.to_string()))
            .map_err(|_| "invalid.uuid".to_string())
    })
}

/// Free text up to `max` characters.
pub fn text(max: usize) -> Validator {
    Box::new(move |raw| {
        if raw.chars().count() > max {
            Err("maxLength".to_string())
        } else {
            Ok(Value::String(raw.to_string()))
        }
    })
}

/// A decimal amount kept as a string: up to `int_digits` integer digits
/// and up to `frac_digits` fractional digits.
pub fn decimal(int_digits: usize, frac_digits: usize) -> Validator {
    Box::new(move |raw| {
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (raw, None),
        };
        let int_ok = !int_part.is_empty()
            && int_part.len() <= int_digits
            && int_part.bytes().all(|b| b.is_ascii_digit());
        let frac_ok = frac_part.is_none_or(|frac| {
            !frac.is_empty()
                && frac.len() <= frac_digits
                && frac.bytes().all(|b| b.is_ascii_digit())
        });
        if int_ok && frac_ok {
            Ok(Value::String(raw.to_string()))
        } else {
            Err("invalid.decimal".to_string())
        }
    })
}

/// A boolean flag (`true`/`false`).
pub fn boolean() -> Validator {
    Box::new(|raw| match raw {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err("invalid.boolean".to_string()),
    })
}

/// One of a fixed set of options, kept verbatim.
pub fn one_of(options: &'static [&'static str]) -> Validator {
    Box::new(move |raw| {
        if options.contains(&raw) {
            Ok(Value::String(raw.to_string()))
        } else {
            Err("invalid.option".to_string())
        }
    })
}

/// One form field: wire name, wrapped validator, required flag.
pub struct FieldSchema {
    name: &'static str,
    normalized: Normalized,
    required: bool,
}

impl FieldSchema {
    pub fn required(name: &'static str, validator: Validator) -> Self {
        FieldSchema {
            name,
            normalized: empty_to_null(validator),
            required: true,
        }
    }

    pub fn optional(name: &'static str, validator: Validator) -> Self {
        FieldSchema {
            name,
            normalized: empty_to_null(validator),
            required: false,
        }
    }
}

/// Message keys a schema reports with. Fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub required: &'static str,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            required: "required",
        }
    }
}

/// A form schema: ordered fields plus the message configuration.
pub struct Schema {
    fields: Vec<FieldSchema>,
    messages: Messages,
}

impl Schema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Schema {
            fields,
            messages: Messages::default(),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Validates raw form input. On success the result is the JSON object
    /// to submit (absent optional fields become explicit nulls); on
    /// failure, every offending field is reported, in declaration order.
    pub fn validate(
        &self,
        input: &BTreeMap<String, String>,
    ) -> Result<Map<String, Value>, Vec<FieldError>> {
        let mut values = Map::new();
        let mut errors = Vec::new();

        for field in &self.fields {
            let raw = input.get(field.name).map(String::as_str);
            match (field.normalized)(raw) {
                Ok(Value::Null) if field.required => {
                    errors.push(FieldError::new(field.name, self.messages.required));
                }
                Ok(value) => {
                    values.insert(field.name.to_string(), value);
                }
                Err(message) => {
                    errors.push(FieldError::new(field.name, &message));
                }
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }
}

/// The booking form schema.
pub fn booking_schema() -> Schema {
    Schema::new(vec![
        FieldSchema::required("checkinDate", date()),
        FieldSchema::required("checkoutDate", date()),
        FieldSchema::optional("status", one_of(&["ACTIVE", "CANCELLED"])),
        FieldSchema::required("user", integer()),
        FieldSchema::required("room", uuid()),
    ])
}

/// The room form schema.
pub fn room_schema() -> Schema {
    Schema::new(vec![
        FieldSchema::required("roomNumber", integer()),
        FieldSchema::required("roomType", text(255)),
        FieldSchema::required("capacity", integer()),
        FieldSchema::required("price", decimal(10, 2)),
        FieldSchema::required("amenities", text(255)),
        FieldSchema::optional("active", boolean()),
    ])
}
