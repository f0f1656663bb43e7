pub mod card;
pub mod options;
pub mod student;
