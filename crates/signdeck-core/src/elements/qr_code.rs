//! QR code element.

use super::{BodyTrait, ElementKind};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// A square QR code encoding a text payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    /// Encoded payload.
    pub text: String,
    /// Side length of the square.
    pub size: f64,
}

impl QrCode {
    pub const DEFAULT_SIZE: f64 = 400.0;
    pub const MIN_SIZE: f64 = 120.0;

    /// Create a QR code. Returns None when there is nothing to encode.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            size: Self::DEFAULT_SIZE,
        })
    }
}

impl BodyTrait for QrCode {
    fn kind(&self) -> ElementKind {
        ElementKind::QrCode
    }

    fn size(&self) -> Size {
        Size::new(self.size, self.size)
    }

    fn set_size(&mut self, size: Size) {
        self.size = size.width.max(size.height).max(Self::MIN_SIZE);
    }

    fn apply_scale(&mut self, scale: Vec2) {
        // Only corner handles are offered, so both factors normally agree.
        self.size = (self.size * scale.x.max(scale.y)).max(Self::MIN_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        assert!(QrCode::new("").is_none());
        assert!(QrCode::new(" \n").is_none());
        assert!(QrCode::new("https://example.com").is_some());
    }

    #[test]
    fn test_square_size() {
        let mut qr = QrCode::new("x").unwrap();
        qr.set_size(Size::new(200.0, 300.0));
        assert_eq!(qr.size(), Size::new(300.0, 300.0));
    }

    #[test]
    fn test_scale_floor() {
        let mut qr = QrCode::new("x").unwrap();
        qr.apply_scale(Vec2::new(0.1, 0.1));
        assert!((qr.size - QrCode::MIN_SIZE).abs() < f64::EPSILON);
    }
}
