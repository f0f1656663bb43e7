use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::student::StudentRecord;

/// Selects which visual layout renders a card.
///
/// Serialized as the strings `"1"` and `"2"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    #[serde(rename = "1")]
    Classic,
    #[serde(rename = "2")]
    Modern,
}

impl TemplateId {
    pub const ALL: [TemplateId; 2] = [TemplateId::Classic, TemplateId::Modern];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Classic => "1",
            TemplateId::Modern => "2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateId::Classic => "Classic",
            TemplateId::Modern => "Modern",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted ID card: the student's data plus creation metadata.
///
/// Never mutated after it has been inserted into the store. The student
/// fields are flattened so the stored JSON object is a single level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    #[serde(flatten)]
    pub student: StudentRecord,
    pub template: TemplateId,
    /// ISO-8601 timestamp, e.g. `2024-01-01T00:00:00.000Z`.
    pub created_at: String,
}

impl CardRecord {
    /// Promotes a validated student to a card with a freshly generated id.
    pub fn new(student: StudentRecord, template: TemplateId, created_at: impl Into<String>) -> Self {
        Self::with_id(generate_card_id(), student, template, created_at)
    }

    pub fn with_id(
        id: impl Into<String>,
        student: StudentRecord,
        template: TemplateId,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            student,
            template,
            created_at: created_at.into(),
        }
    }

    /// Date part (`YYYY-MM-DD`) of `created_at`, or the whole string when it
    /// is shorter than that.
    pub fn created_date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }
}

/// Random UUID v4 string.
pub fn generate_card_id() -> String {
    Uuid::new_v4().to_string()
}
