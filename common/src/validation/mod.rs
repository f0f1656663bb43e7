pub mod errors;
pub mod photo;

use serde::{Deserialize, Serialize};

use crate::model::options::{is_known_bus_route, is_known_class, is_known_division};
use crate::model::student::StudentRecord;

pub use errors::{Field, FieldErrors, PhotoTooLarge, ValidationError};

/// Default upload limit: 2 MiB.
pub const DEFAULT_MAX_PHOTO_BYTES: u64 = 2 * 1024 * 1024;

/// Tunable validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRules {
    /// Largest accepted photo file, in bytes (inclusive).
    pub max_photo_bytes: u64,
    /// When set, submitting without a photo fails on the `photo` field.
    pub photo_required: bool,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            photo_required: false,
        }
    }
}

impl FormRules {
    pub fn check_photo_size(&self, size: u64) -> Result<(), PhotoTooLarge> {
        photo::check_photo_size(size, self.max_photo_bytes)
    }
}

/// Raw form values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStudentInput {
    pub name: String,
    pub roll_number: String,
    pub class: String,
    pub division: String,
    pub allergies: Vec<String>,
    pub photo: Option<String>,
    pub rack_number: String,
    pub bus_route: String,
}

impl RawStudentInput {
    /// Mutable access to a text or option field. `Allergies` and `Photo` have
    /// dedicated operations and return `None`.
    pub fn text_field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::RollNumber => Some(&mut self.roll_number),
            Field::Class => Some(&mut self.class),
            Field::Division => Some(&mut self.division),
            Field::RackNumber => Some(&mut self.rack_number),
            Field::BusRoute => Some(&mut self.bus_route),
            Field::Allergies | Field::Photo => None,
        }
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        if let Some(slot) = self.text_field_mut(field) {
            *slot = value.into();
        }
    }

    pub fn has_allergy(&self, tag: &str) -> bool {
        self.allergies.iter().any(|a| a == tag)
    }

    /// Checkbox behaviour: checking appends the tag when absent, unchecking
    /// removes one occurrence.
    pub fn toggle_allergy(&mut self, tag: &str, checked: bool) {
        if checked {
            if !self.has_allergy(tag) {
                self.allergies.push(tag.to_string());
            }
        } else {
            self.remove_allergy(tag);
        }
    }

    /// Adds a free-text tag. Returns false for blank or already present tags.
    pub fn add_custom_allergy(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.has_allergy(tag) {
            return false;
        }
        self.allergies.push(tag.to_string());
        true
    }

    /// Removes exactly one occurrence of `tag`. Returns whether one was found.
    pub fn remove_allergy(&mut self, tag: &str) -> bool {
        match self.allergies.iter().position(|a| a == tag) {
            Some(idx) => {
                self.allergies.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Stores an uploaded photo as a data URI. On `PhotoTooLarge` the input is
    /// left exactly as it was.
    pub fn attach_photo(
        &mut self,
        bytes: &[u8],
        mime: &str,
        rules: &FormRules,
    ) -> Result<(), PhotoTooLarge> {
        rules.check_photo_size(bytes.len() as u64)?;
        self.photo = Some(photo::encode_data_uri(bytes, mime));
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Checks the required-field and option rules and builds the normalized
    /// record. Text is trimmed; allergy tags are trimmed and blank ones
    /// dropped.
    pub fn validate_and_normalize(&self, rules: &FormRules) -> Result<StudentRecord, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required(&self.name, Field::Name, &mut errors);
        let roll_number = required(&self.roll_number, Field::RollNumber, &mut errors);
        let class = option(&self.class, Field::Class, is_known_class, &mut errors);
        let division = option(&self.division, Field::Division, is_known_division, &mut errors);
        let rack_number = required(&self.rack_number, Field::RackNumber, &mut errors);
        let bus_route = option(&self.bus_route, Field::BusRoute, is_known_bus_route, &mut errors);

        let photo = match self.photo.as_deref() {
            Some(uri) if photo::is_data_uri(uri) => Some(uri.to_string()),
            Some(_) => {
                errors.push(ValidationError::new(
                    Field::Photo,
                    "Photo must be an uploaded image",
                ));
                None
            }
            None if rules.photo_required => {
                errors.push(ValidationError::photo_required());
                None
            }
            None => None,
        };

        if !errors.is_empty() {
            log::debug!("student form rejected: {}", errors);
            return Err(errors);
        }

        let allergies = self
            .allergies
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Ok(StudentRecord {
            name,
            roll_number,
            class,
            division,
            allergies,
            photo,
            rack_number,
            bus_route,
        })
    }
}

impl From<&StudentRecord> for RawStudentInput {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            roll_number: record.roll_number.clone(),
            class: record.class.clone(),
            division: record.division.clone(),
            allergies: record.allergies.clone(),
            photo: record.photo.clone(),
            rack_number: record.rack_number.clone(),
            bus_route: record.bus_route.clone(),
        }
    }
}

fn required(value: &str, field: Field, errors: &mut FieldErrors) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::required(field));
    }
    value.to_string()
}

fn option(value: &str, field: Field, known: fn(&str) -> bool, errors: &mut FieldErrors) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::required(field));
    } else if !known(value) {
        errors.push(ValidationError::new(
            field,
            format!("\"{}\" is not a valid {}", value, field.label()),
        ));
    }
    value.to_string()
}
