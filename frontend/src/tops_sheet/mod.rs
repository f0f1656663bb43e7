mod top_sheet;

pub use top_sheet::{close_top_sheet, open_top_sheet, TopSheet};
