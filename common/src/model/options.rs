//! Option lists offered by the student form.
//!
//! `class`, `division` and `bus_route` must hold one of these labels to pass
//! validation. The allergy list only seeds the checkboxes; custom tags are
//! accepted as well.

pub const CLASSES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

pub const DIVISIONS: &[&str] = &["A", "B", "C", "D"];

pub const ALLERGIES: &[&str] = &["Nuts", "Dairy", "Eggs", "Seafood", "Gluten", "Pollen"];

pub const BUS_ROUTES: &[&str] = &[
    "Route 1", "Route 2", "Route 3", "Route 4", "Route 5", "Route 6",
];

pub fn is_known_class(label: &str) -> bool {
    CLASSES.contains(&label)
}

pub fn is_known_division(label: &str) -> bool {
    DIVISIONS.contains(&label)
}

pub fn is_known_bus_route(label: &str) -> bool {
    BUS_ROUTES.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_are_matched_exactly() {
        assert!(is_known_class("12"));
        assert!(!is_known_class("13"));
        assert!(is_known_division("C"));
        assert!(!is_known_division("c"));
        assert!(is_known_bus_route("Route 6"));
        assert!(!is_known_bus_route("Route 7"));
    }
}
