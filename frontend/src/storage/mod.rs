mod browser_slot;

pub use browser_slot::BrowserSlot;
