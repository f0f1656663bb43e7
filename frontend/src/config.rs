use common::validation::FormRules;
use log::LevelFilter;

/// `localStorage` key holding the JSON array of saved cards.
pub const STORAGE_SLOT: &str = "studentCards";

/// How long toast notifications stay on screen.
pub const TOAST_DURATION_MS: u32 = 3000;

#[cfg(debug_assertions)]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Photo limit is 2 MiB and the photo is optional.
pub fn form_rules() -> FormRules {
    FormRules::default()
}
