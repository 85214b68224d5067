//! Web page panel.

use super::ElementKind;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// A live web page shown inside a rectangular panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPage {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

impl WebPage {
    pub const DEFAULT_SIZE: Size = Size::new(1280.0, 720.0);
    pub const MIN_SIZE: Size = Size::new(160.0, 120.0);

    /// Create a panel for `url`. Returns None for a blank url.
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return None;
        }
        Some(Self {
            url,
            width: Self::DEFAULT_SIZE.width,
            height: Self::DEFAULT_SIZE.height,
        })
    }
}

boxed_body!(WebPage, ElementKind::WebPage);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::BodyTrait;
    use kurbo::Vec2;

    #[test]
    fn test_blank_url_rejected() {
        assert!(WebPage::new("").is_none());
        assert!(WebPage::new("   ").is_none());
    }

    #[test]
    fn test_url_trimmed() {
        let page = WebPage::new("  https://example.com ").unwrap();
        assert_eq!(page.url, "https://example.com");
        assert_eq!(page.size(), WebPage::DEFAULT_SIZE);
    }

    #[test]
    fn test_scale_clamped() {
        let mut page = WebPage::new("https://example.com").unwrap();
        page.apply_scale(Vec2::new(0.01, 0.5));
        assert!((page.width - 160.0).abs() < f64::EPSILON);
        assert!((page.height - 360.0).abs() < f64::EPSILON);
    }
}
