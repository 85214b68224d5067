//! Editor configuration.

use crate::transform::SnapSettings;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Editor settings. Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Page width in page units.
    pub page_width: f64,
    pub page_height: f64,
    /// Page-edge snap distance in screen pixels.
    pub page_snap_threshold: f64,
    /// Alignment guide distance in screen pixels.
    pub guide_threshold: f64,
    /// Offset of pasted copies in page units.
    pub paste_offset: f64,
    /// Page background color.
    pub background: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            page_width: 3840.0,
            page_height: 2160.0,
            page_snap_threshold: 10.0,
            guide_threshold: 8.0,
            paste_offset: crate::clipboard::PASTE_OFFSET,
            background: "#000000".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("config: loaded {}", path.display());
        Self::from_json(&json)
    }

    /// Check that the page has a positive size and that thresholds and
    /// the paste offset are finite and non-negative.
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.page_width) || !positive(self.page_height) {
            return Err(ConfigError::Invalid(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        for (name, value) in [
            ("page_snap_threshold", self.page_snap_threshold),
            ("guide_threshold", self.guide_threshold),
            ("paste_offset", self.paste_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }

    /// The artboard in page coordinates.
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.page_height)
    }

    /// Snap thresholds for the transform controller.
    pub fn snap_settings(&self) -> SnapSettings {
        SnapSettings {
            page: self.page_rect(),
            page_threshold_px: self.page_snap_threshold,
            guide_threshold_px: self.guide_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.page_width - 3840.0).abs() < f64::EPSILON);
        assert!((config.page_height - 2160.0).abs() < f64::EPSILON);
        assert!((config.paste_offset - 32.0).abs() < f64::EPSILON);
        assert_eq!(config.background, "#000000");
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{ "page_width": 1920, "page_height": 1080 }"#).unwrap();
        assert!((config.page_width - 1920.0).abs() < f64::EPSILON);
        assert!((config.guide_threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.page_rect(), Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn test_invalid_page() {
        let err = EditorConfig::from_json(r#"{ "page_width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = EditorConfig::from_json(r#"{ "paste_offset": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, r##"{ "background": "#112233" }"##).unwrap();
        let config = EditorConfig::from_path(&path).unwrap();
        assert_eq!(config.background, "#112233");

        let missing = EditorConfig::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
