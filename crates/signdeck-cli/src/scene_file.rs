//! Scene description files read from disk.
//!
//! A scene file lists elements in host order. Groups are written as free-form
//! labels; every label is given a fresh group id when the canvas is built.

use crate::CliError;
use kurbo::{Point, Vec2};
use serde::Deserialize;
use signdeck_core::{Canvas, EditorConfig, ElementBody, ElementTemplate, GroupId};
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// One element as written in a scene file.
#[derive(Debug, Deserialize)]
pub struct SceneEntry {
    pub position: Point,
    #[serde(default)]
    pub locked: bool,
    /// Entries sharing a label form one group.
    #[serde(default)]
    pub group: Option<String>,
    pub body: ElementBody,
}

/// Top-level scene document.
#[derive(Debug, Default, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub elements: Vec<SceneEntry>,
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file.
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a canvas holding every entry. Nothing is selected afterwards.
    ///
    /// Entries get the same checks as elements added in the editor: a blank
    /// url, video source or QR text is refused and sizes are raised to the
    /// kind minimum.
    pub fn into_canvas(self, config: EditorConfig) -> Result<Canvas, CliError> {
        let mut canvas = Canvas::with_config(config);
        let mut groups: HashMap<String, GroupId> = HashMap::new();
        for (index, entry) in self.elements.into_iter().enumerate() {
            if let Some(field) = entry.body.blank_payload() {
                return Err(CliError::BlankPayload {
                    index,
                    kind: entry.body.kind().name(),
                    field,
                });
            }
            let mut body = entry.body;
            body.clamp_to_minimum();
            let template = ElementTemplate {
                position: entry.position,
                locked: entry.locked,
                body,
            };
            let mut element = template.instantiate(Vec2::ZERO);
            element.group_id = entry
                .group
                .map(|label| *groups.entry(label).or_insert_with(Uuid::new_v4));
            canvas.insert(element);
        }
        log::debug!(
            "scene: loaded {} elements in {} groups",
            canvas.scene().len(),
            groups.len()
        );
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signdeck_core::ElementKind;
    use signdeck_core::elements::ShapeType;
    use std::io::Write;

    const SCENE: &str = r##"{
        "elements": [
            {
                "position": { "x": 100, "y": 50 },
                "group": "header",
                "body": {
                    "kind": "text",
                    "text": "Welcome",
                    "font_size": 72,
                    "font_family": "Noto Sans",
                    "fill": "#ffffff",
                    "background": "transparent"
                }
            },
            {
                "position": { "x": 100, "y": 200 },
                "group": "header",
                "body": { "kind": "shape", "shape_type": "rectangle", "width": 800, "height": 20, "fill": "#ff8800" }
            },
            {
                "position": { "x": 2000, "y": 1000 },
                "locked": true,
                "body": { "kind": "qr_code", "text": "https://example.com", "size": 300 }
            }
        ]
    }"##;

    #[test]
    fn test_scene_builds_canvas() {
        let canvas = SceneFile::from_json(SCENE).unwrap().into_canvas(EditorConfig::default()).unwrap();
        let scene = canvas.scene();
        assert_eq!(scene.len(), 3);
        assert!(canvas.selection().is_empty());

        let text = scene.iter_kind(ElementKind::Text).next().unwrap();
        let shape = scene.iter_kind(ElementKind::Shape).next().unwrap();
        let qr = scene.iter_kind(ElementKind::QrCode).next().unwrap();
        assert!(text.group_id.is_some());
        assert_eq!(text.group_id, shape.group_id);
        assert_eq!(qr.group_id, None);
        assert!(qr.locked);
        assert_eq!(shape.position, Point::new(100.0, 200.0));
        assert!(matches!(&shape.body, ElementBody::Shape(s) if s.shape_type == ShapeType::Rectangle));
    }

    #[test]
    fn test_group_labels_get_distinct_ids() {
        let json = r##"{ "elements": [
            { "position": { "x": 0, "y": 0 }, "group": "a", "body": { "kind": "clock" } },
            { "position": { "x": 0, "y": 0 }, "group": "b", "body": { "kind": "clock" } }
        ] }"##;
        let canvas = SceneFile::from_json(json).unwrap().into_canvas(EditorConfig::default()).unwrap();
        let groups: Vec<_> = canvas.scene().iter().map(|e| e.group_id).collect();
        assert!(groups.iter().all(Option::is_some));
        assert_ne!(groups[0], groups[1]);
    }

    #[test]
    fn test_empty_document() {
        let canvas = SceneFile::from_json("{}").unwrap().into_canvas(EditorConfig::default()).unwrap();
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_empty_qr_refused() {
        let json = r#"{ "elements": [
            { "position": { "x": 0, "y": 0 }, "body": { "kind": "clock" } },
            { "position": { "x": 0, "y": 0 }, "body": { "kind": "qr_code", "text": "", "size": 400 } }
        ] }"#;
        let err = SceneFile::from_json(json).unwrap().into_canvas(EditorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::BlankPayload {
                index: 1,
                kind: "qr_code",
                field: "text"
            }
        ));
    }

    #[test]
    fn test_blank_url_and_video_refused() {
        for body in [
            r#"{ "kind": "web_page", "url": "  ", "width": 1280, "height": 720 }"#,
            r#"{ "kind": "youtube", "source": "", "width": 1280, "height": 720 }"#,
        ] {
            let json = format!(r#"{{ "elements": [ {{ "position": {{ "x": 0, "y": 0 }}, "body": {body} }} ] }}"#);
            let result = SceneFile::from_json(&json).unwrap().into_canvas(EditorConfig::default());
            assert!(matches!(result, Err(CliError::BlankPayload { index: 0, .. })));
        }
    }

    #[test]
    fn test_sizes_raised_to_minimum() {
        let json = r##"{ "elements": [
            { "position": { "x": 0, "y": 0 }, "body": { "kind": "shape", "shape_type": "circle", "width": 1, "height": 500, "fill": "#fff" } },
            { "position": { "x": 0, "y": 0 }, "body": { "kind": "qr_code", "text": "menu", "size": 10 } }
        ] }"##;
        let canvas = SceneFile::from_json(json).unwrap().into_canvas(EditorConfig::default()).unwrap();
        let shape = canvas.scene().iter_kind(ElementKind::Shape).next().unwrap();
        assert_eq!(shape.size(), kurbo::Size::new(40.0, 500.0));
        let qr = canvas.scene().iter_kind(ElementKind::QrCode).next().unwrap();
        assert_eq!(qr.size(), kurbo::Size::new(120.0, 120.0));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{ "elements": [ { "position": { "x": 0, "y": 0 }, "body": { "kind": "hologram" } } ] }"#;
        assert!(matches!(SceneFile::from_json(json), Err(CliError::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();
        let scene = SceneFile::from_path(file.path()).unwrap();
        assert_eq!(scene.elements.len(), 3);

        let missing = file.path().with_extension("missing");
        assert!(matches!(SceneFile::from_path(&missing), Err(CliError::Io { .. })));
    }
}
