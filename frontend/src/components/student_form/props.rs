use common::model::student::StudentRecord;
use common::validation::FormRules;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StudentFormProps {
    /// Receives the normalized record when the form validates.
    pub on_submit: Callback<StudentRecord>,

    /// Record to load into the form after picking a card from history.
    /// Applied whenever it changes.
    #[prop_or_default]
    pub prefill: Option<Prefill>,

    #[prop_or_default]
    pub rules: FormRules,
}

/// A record pushed into the form. `revision` grows with every selection, so
/// picking the same card twice still reloads the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefill {
    pub record: StudentRecord,
    pub revision: u64,
}

impl Prefill {
    /// The prefill that follows `previous`.
    pub fn after(previous: Option<&Prefill>, record: StudentRecord) -> Self {
        Self {
            record,
            revision: previous.map_or(0, |p| p.revision + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StudentRecord {
        StudentRecord {
            name: "Jane Doe".into(),
            roll_number: "42".into(),
            class: "5".into(),
            division: "A".into(),
            allergies: Vec::new(),
            photo: None,
            rack_number: "R1".into(),
            bus_route: "Route 3".into(),
        }
    }

    #[test]
    fn selecting_the_same_record_twice_changes_the_prop() {
        let first = Prefill::after(None, record());
        let second = Prefill::after(Some(&first), record());

        assert_eq!(first.record, second.record);
        assert_ne!(Some(first), Some(second));
    }
}
