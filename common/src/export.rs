use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::model::student::StudentRecord;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("whitespace pattern is valid")
});

/// Stem used when the student name is empty.
pub const FALLBACK_STEM: &str = "student";

/// `<name>_id_card.png`, where `<name>` is the student name lower-cased with
/// every run of whitespace replaced by a single underscore, or `student` when
/// the name is empty.
pub fn download_file_name(name: &str) -> String {
    let stem = WHITESPACE.replace_all(name, "_").to_lowercase();
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
    format!("{}_id_card.png", stem)
}

/// JSON encoded into the card's QR code: the student record without its
/// photo, which would not fit in a QR symbol.
pub fn qr_payload(student: &StudentRecord) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(student)?;
    if let Value::Object(fields) = &mut value {
        fields.remove("photo");
    }
    serde_json::to_string(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_with_photo() -> StudentRecord {
        StudentRecord {
            name: "Jane Doe".into(),
            roll_number: "42".into(),
            class: "5".into(),
            division: "A".into(),
            allergies: vec!["Nuts".into()],
            photo: Some("data:image/png;base64,iVBORw==".into()),
            rack_number: "R1".into(),
            bus_route: "Route 3".into(),
        }
    }

    #[test]
    fn collapses_whitespace_and_lowercases() {
        assert_eq!(download_file_name("Jane Doe"), "jane_doe_id_card.png");
        assert_eq!(download_file_name("Mary  Ann\tLee"), "mary_ann_lee_id_card.png");
    }

    #[test]
    fn empty_name_uses_fallback() {
        assert_eq!(download_file_name(""), "student_id_card.png");
    }

    #[test]
    fn qr_payload_leaves_out_the_photo() {
        let payload = qr_payload(&student_with_photo()).unwrap();
        let value: Value = serde_json::from_str(&payload).unwrap();

        assert!(value.get("photo").is_none());
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["rollNumber"], "42");
        assert_eq!(value["allergies"][0], "Nuts");
        assert!(!payload.contains("base64"));
    }
}
