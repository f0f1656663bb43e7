use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    RollNumber,
    Class,
    Division,
    Allergies,
    Photo,
    RackNumber,
    BusRoute,
}

impl Field {
    /// Name of the field in the persisted JSON layout.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::RollNumber => "rollNumber",
            Field::Class => "class",
            Field::Division => "division",
            Field::Allergies => "allergies",
            Field::Photo => "photo",
            Field::RackNumber => "rackNumber",
            Field::BusRoute => "busRoute",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::RollNumber => "Roll Number",
            Field::Class => "Class",
            Field::Division => "Division",
            Field::Allergies => "Allergies",
            Field::Photo => "Photo",
            Field::RackNumber => "Rack Number",
            Field::BusRoute => "Bus Route",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, format!("{} is required", field.label()))
    }

    /// The `photo` field error raised when the rules demand a photo.
    pub fn photo_required() -> Self {
        Self::new(Field::Photo, "Photo is required")
    }
}

/// Every failed field of one validation pass, in field order.
///
/// Holds at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid form: {}", join_messages(.0))]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` unless its field already has a message.
    pub fn push(&mut self, error: ValidationError) {
        if self.get(error.field).is_none() {
            self.0.push(error);
            self.0.sort_by_key(|e| e.field);
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.retain(|e| e.field != field);
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    messages.join("; ")
}

/// An uploaded photo exceeded the configured size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("File size should not exceed {} ({size} bytes given)", limit_label(.limit))]
pub struct PhotoTooLarge {
    pub size: u64,
    pub limit: u64,
}

fn limit_label(limit: &u64) -> String {
    format_size(*limit)
}

/// Formats a byte count as whole MB when it is a multiple of a MiB.
pub fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_one_message_per_field_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.push(ValidationError::required(Field::BusRoute));
        errors.push(ValidationError::required(Field::Name));
        errors.push(ValidationError::new(Field::Name, "second message"));

        assert_eq!(errors.fields(), vec![Field::Name, Field::BusRoute]);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(
            errors.to_string(),
            "invalid form: name: Name is required; busRoute: Bus Route is required"
        );
    }

    #[test]
    fn photo_too_large_message_names_the_limit() {
        let err = PhotoTooLarge {
            size: 3 * 1024 * 1024,
            limit: 2 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "File size should not exceed 2MB (3145728 bytes given)"
        );
    }
}
