//! Clipboard and duplicate.

use crate::elements::{Element, ElementBody};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default offset applied to pasted and duplicated elements.
pub const PASTE_OFFSET: f64 = 32.0;

/// An element without identity: no id and no group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTemplate {
    pub position: Point,
    #[serde(default)]
    pub locked: bool,
    pub body: ElementBody,
}

impl ElementTemplate {
    /// Snapshot of an element's position, lock flag and body.
    pub fn from_element(element: &Element) -> Self {
        Self {
            position: element.position,
            locked: element.locked,
            body: element.body.clone(),
        }
    }

    /// Create a new element with a fresh id, shifted by `offset`.
    pub fn instantiate(&self, offset: Vec2) -> Element {
        let mut element = Element::new(self.position + offset, self.body.clone());
        element.locked = self.locked;
        element
    }
}

/// Single-entry clipboard.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entry: Option<ElementTemplate>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard with a copy of `element`.
    pub fn copy(&mut self, element: &Element) {
        self.entry = Some(ElementTemplate::from_element(element));
    }

    pub fn entry(&self) -> Option<&ElementTemplate> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Element for a paste at `offset` from the copied position.
    pub fn paste(&self, offset: f64) -> Option<Element> {
        self.entry.as_ref().map(|t| t.instantiate(Vec2::new(offset, offset)))
    }
}

/// Copies of `elements` for a multi-duplicate.
///
/// The copy at index `i` is shifted by `offset * (i + 1)` on both axes and
/// carries no group.
pub fn duplicate_all<'a>(elements: impl IntoIterator<Item = &'a Element>, offset: f64) -> Vec<Element> {
    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            let step = offset * (i + 1) as f64;
            ElementTemplate::from_element(element).instantiate(Vec2::new(step, step))
        })
        .collect()
}
