use common::model::student::StudentRecord;
use common::validation::{Field, FieldErrors, RawStudentInput};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::props::StudentFormProps;

pub struct StudentFormComponent {
    /// Values as typed.
    pub input: RawStudentInput,

    /// Text of the "add allergy" box, not yet part of `input`.
    pub custom_allergy: String,

    /// Errors from the last submit, minus fields edited since.
    pub errors: FieldErrors,

    /// Upload problem (size or read failure). Takes precedence over the
    /// `photo` entry of `errors`.
    pub photo_error: Option<String>,

    /// A selected file is being read.
    pub photo_loading: bool,

    /// Hidden `<input type="file">` behind the upload button.
    pub file_input_ref: NodeRef,
}

impl StudentFormComponent {
    pub fn new(props: &StudentFormProps) -> Self {
        Self {
            input: props
                .prefill
                .as_ref()
                .map(|prefill| RawStudentInput::from(&prefill.record))
                .unwrap_or_default(),
            custom_allergy: String::new(),
            errors: FieldErrors::new(),
            photo_error: None,
            photo_loading: false,
            file_input_ref: NodeRef::default(),
        }
    }

    /// Replaces every field with `record` and drops pending errors.
    pub fn load(&mut self, record: &StudentRecord) {
        self.input = RawStudentInput::from(record);
        self.custom_allergy.clear();
        self.errors = FieldErrors::new();
        self.photo_error = None;
        self.reset_file_input();
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        if field == Field::Photo {
            if let Some(message) = &self.photo_error {
                return Some(message.as_str());
            }
        }
        self.errors.get(field)
    }

    /// Clears the file input so picking the same file again fires `change`.
    pub fn reset_file_input(&self) {
        if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }
}
