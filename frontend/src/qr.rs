use common::export::qr_payload;
use common::model::student::StudentRecord;
use qrcode::{Color, QrCode};

/// Module grid of the QR code printed on a card, without the quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encodes the student's details. Returns `None`, after logging, when the
    /// payload cannot be encoded; the card is then drawn without a code.
    pub fn for_student(student: &StudentRecord) -> Option<Self> {
        let payload = match qr_payload(student) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("could not serialize QR payload: {}", err);
                return None;
            }
        };
        match QrCode::new(payload.as_bytes()) {
            Ok(code) => Some(Self {
                width: code.width(),
                dark: code.to_colors().into_iter().map(|c| c == Color::Dark).collect(),
            }),
            Err(err) => {
                log::warn!("could not encode QR code: {}", err);
                None
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// `(x, y)` of every dark module, row by row.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        (0..width)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_dark(x, y))
    }

    /// SVG path data with one unit square per dark module, for a
    /// `0 0 width width` view box.
    pub fn svg_path(&self) -> String {
        let mut path = String::new();
        for (x, y) in self.dark_modules() {
            path.push_str(&format!("M{},{}h1v1h-1z", x, y));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> StudentRecord {
        StudentRecord {
            name: "Jane Doe".into(),
            roll_number: "42".into(),
            class: "5".into(),
            division: "A".into(),
            allergies: vec!["Nuts".into(), "Dairy".into()],
            photo: Some(format!("data:image/png;base64,{}", "A".repeat(200_000))),
            rack_number: "R1".into(),
            bus_route: "Route 3".into(),
        }
    }

    #[test]
    fn encodes_student_with_large_photo() {
        let matrix = QrMatrix::for_student(&student()).unwrap();
        assert!(matrix.width() >= 21);
        assert_eq!(matrix.dark.len(), matrix.width() * matrix.width());
    }

    #[test]
    fn finder_pattern_corners_are_dark() {
        let matrix = QrMatrix::for_student(&student()).unwrap();
        let last = matrix.width() - 1;
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(last, 0));
        assert!(matrix.is_dark(0, last));
        assert!(!matrix.is_dark(matrix.width(), 0));
    }

    #[test]
    fn svg_path_has_one_square_per_dark_module() {
        let matrix = QrMatrix::for_student(&student()).unwrap();
        let path = matrix.svg_path();
        assert!(path.starts_with("M0,0h1v1h-1z"));
        assert_eq!(path.matches('M').count(), matrix.dark_modules().count());
    }
}
