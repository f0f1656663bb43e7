pub mod card_preview;
pub mod history;
pub mod student_form;
pub mod templates;
