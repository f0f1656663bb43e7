use serde::{Deserialize, Serialize};

/// Normalized output of the student form.
///
/// Produced only by `RawStudentInput::validate_and_normalize`, so every
/// instance satisfies the required-field and option-label rules. Field names
/// are serialized in camelCase to keep the persisted layout stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub name: String,
    pub roll_number: String,
    pub class: String,
    pub division: String,
    /// Tags in the order they were added. Duplicates are kept out by the form
    /// state, not by this type.
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Self-contained `data:<mime>;base64,<payload>` URI, or `None`.
    #[serde(default)]
    pub photo: Option<String>,
    pub rack_number: String,
    pub bus_route: String,
}

impl StudentRecord {
    /// "5 A" style label used by the card layouts and the history panel.
    pub fn class_label(&self) -> String {
        format!("{} {}", self.class, self.division)
    }
}
