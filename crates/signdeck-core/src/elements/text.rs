//! Text element.

use super::{BodyTrait, ElementKind};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Font style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// CSS-like keyword used on the wire.
    pub fn keyword(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
            FontStyle::BoldItalic => "bold italic",
        }
    }
}

/// Text decoration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

impl TextDecoration {
    pub fn keyword(self) -> &'static str {
        match self {
            TextDecoration::None => "none",
            TextDecoration::Underline => "underline",
            TextDecoration::LineThrough => "line-through",
        }
    }
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Marquee animation applied by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl ScrollMode {
    pub fn keyword(self) -> &'static str {
        match self {
            ScrollMode::None => "none",
            ScrollMode::Left => "left",
            ScrollMode::Right => "right",
            ScrollMode::Up => "up",
            ScrollMode::Down => "down",
        }
    }
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The text content.
    pub text: String,
    /// Explicit box width. `None` sizes the box to the content.
    #[serde(default)]
    pub width: Option<f64>,
    /// Font size in page pixels.
    pub font_size: f64,
    pub font_family: String,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub align: HorizontalAlign,
    /// Text color.
    pub fill: String,
    /// Background color or `"transparent"`.
    pub background: String,
    #[serde(default)]
    pub scroll: ScrollMode,
    /// Layout size reported by the renderer.
    /// If None, approximate bounds are used.
    #[serde(skip)]
    measured: Option<Size>,
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 40.0;
    pub const DEFAULT_FONT_FAMILY: &'static str = "Noto Sans";
    pub const DEFAULT_TEXT: &'static str = "Text";
    pub const MIN_WIDTH: f64 = 120.0;
    pub const MIN_FONT_SIZE: f64 = 1.0;
    pub const MAX_FONT_SIZE: f64 = 1024.0;
    /// Average glyph advance relative to the font size, for unmeasured text.
    const CHAR_WIDTH_RATIO: f64 = 0.6;
    const LINE_HEIGHT: f64 = 1.2;

    /// Create a text element with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: None,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            align: HorizontalAlign::default(),
            fill: "#ffffff".to_string(),
            background: "transparent".to_string(),
            scroll: ScrollMode::default(),
            measured: None,
        }
    }

    /// Round and clamp a font size into the supported range.
    pub fn clamp_font_size(size: f64) -> f64 {
        size.round().clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE)
    }

    /// Apply the font range and, for an explicit width, the minimum width.
    pub fn clamp_to_minimum(&mut self) {
        self.font_size = Self::clamp_font_size(self.font_size);
        if let Some(width) = self.width {
            self.width = Some(width.max(Self::MIN_WIDTH));
        }
    }

    /// Record the layout size computed by the renderer.
    pub fn set_measured_size(&mut self, size: Size) {
        self.measured = Some(size);
    }

    /// Layout size reported by the renderer, if any.
    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    fn approximate_size(&self) -> Size {
        let lines: Vec<&str> = self.text.lines().collect();
        let line_count = lines.len().max(1) as f64;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        Size::new(
            longest * self.font_size * Self::CHAR_WIDTH_RATIO,
            line_count * self.font_size * Self::LINE_HEIGHT,
        )
    }
}

impl BodyTrait for Text {
    fn kind(&self) -> ElementKind {
        ElementKind::Text
    }

    fn size(&self) -> Size {
        let content = self.measured.unwrap_or_else(|| self.approximate_size());
        match self.width {
            Some(width) => Size::new(width, content.height),
            None => content,
        }
    }

    fn set_size(&mut self, size: Size) {
        // Height follows from the font size and content.
        self.width = Some(size.width.max(Self::MIN_WIDTH));
        self.measured = None;
    }

    fn apply_scale(&mut self, scale: Vec2) {
        let width = self.size().width * scale.x;
        self.width = Some(width.max(Self::MIN_WIDTH));
        self.font_size = Self::clamp_font_size(self.font_size * scale.y);
        self.measured = None;
    }
}
