//! Live widgets: clock, weather and embedded YouTube video.

use super::ElementKind;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Color scheme of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetTheme {
    Light,
    #[default]
    Dark,
}

impl WidgetTheme {
    pub fn name(self) -> &'static str {
        match self {
            WidgetTheme::Light => "light",
            WidgetTheme::Dark => "dark",
        }
    }
}

/// Digital clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clock {
    pub time_format: String,
    pub date_format: String,
    #[serde(default)]
    pub theme: WidgetTheme,
    pub width: f64,
    pub height: f64,
}

impl Clock {
    pub const DEFAULT_SIZE: Size = Size::new(480.0, 160.0);
    pub const MIN_SIZE: Size = Size::new(120.0, 60.0);
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            time_format: "HH:mm".to_string(),
            date_format: "YYYY-MM-DD".to_string(),
            theme: WidgetTheme::default(),
            width: Self::DEFAULT_SIZE.width,
            height: Self::DEFAULT_SIZE.height,
        }
    }
}

boxed_body!(Clock, ElementKind::Clock);

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub theme: WidgetTheme,
    pub width: f64,
    pub height: f64,
}

impl Weather {
    pub const DEFAULT_SIZE: Size = Size::new(480.0, 240.0);
    pub const MIN_SIZE: Size = Size::new(120.0, 60.0);

    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            theme: WidgetTheme::default(),
            width: Self::DEFAULT_SIZE.width,
            height: Self::DEFAULT_SIZE.height,
        }
    }
}

boxed_body!(Weather, ElementKind::Weather);

/// Embedded YouTube video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTube {
    /// Video id or watch url.
    pub source: String,
    pub width: f64,
    pub height: f64,
}

impl YouTube {
    pub const DEFAULT_SIZE: Size = Size::new(1280.0, 720.0);
    pub const MIN_SIZE: Size = Size::new(160.0, 120.0);

    /// Returns None for a blank source.
    pub fn new(source: impl Into<String>) -> Option<Self> {
        let source = source.into().trim().to_string();
        if source.is_empty() {
            return None;
        }
        Some(Self {
            source,
            width: Self::DEFAULT_SIZE.width,
            height: Self::DEFAULT_SIZE.height,
        })
    }
}

boxed_body!(YouTube, ElementKind::YouTube);
