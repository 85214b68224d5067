//! Uploaded media element.

use super::{ElementKind, clamp_size};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Kind of uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaKind {
    pub fn name(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
        }
    }
}

/// A media file placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    /// Display name, usually the uploaded file name.
    pub name: String,
    /// Reference the player resolves. Falls back to `name` when absent.
    #[serde(default)]
    pub source: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl Media {
    pub const MIN_SIZE: Size = Size::new(160.0, 120.0);
}

boxed_body!(Media, ElementKind::Media);

/// File description handed over by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub name: String,
    #[serde(default)]
    pub source: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl From<MediaUpload> for Media {
    fn from(upload: MediaUpload) -> Self {
        let size = clamp_size(Size::new(upload.width, upload.height), Media::MIN_SIZE);
        Media {
            kind: upload.kind,
            name: upload.name,
            source: upload.source,
            width: size.width,
            height: size.height,
        }
    }
}
