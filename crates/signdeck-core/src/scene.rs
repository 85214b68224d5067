//! Scene store: the authoritative collection of placed elements.

use crate::elements::{Element, ElementBody, ElementId, ElementKind, GroupId};
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::BTreeMap;

/// Field-level partial update for an element.
///
/// Unset fields are left untouched. The id and kind of an element never change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub locked: Option<bool>,
    /// `Some(None)` clears the group tag.
    pub group_id: Option<Option<GroupId>>,
    /// Replacement body. Must be of the same kind as the element.
    pub body: Option<ElementBody>,
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the element's top-left corner.
    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Set or clear the group tag.
    pub fn group(mut self, group_id: Option<GroupId>) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn body(mut self, body: ElementBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Ordered per-kind element collections.
///
/// Insertion order is paint order within a kind. Kinds paint in the fixed
/// order of [`ElementKind`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    collections: BTreeMap<ElementKind, Vec<Element>>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to its kind's collection.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id();
        debug_assert!(!self.contains(id), "duplicate element id {id}");
        log::debug!("scene: add {} {}", element.kind().name(), id);
        self.collections.entry(element.kind()).or_default().push(element);
        id
    }

    /// Merge `update` into the element. Returns false if the element is absent.
    pub fn update(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };

        if let Some(body) = update.body {
            if body.kind() == element.kind() {
                element.body = body;
            } else {
                log::warn!(
                    "scene: ignoring {} body patch for {} element {}",
                    body.kind().name(),
                    element.kind().name(),
                    id
                );
            }
        }
        if let Some(size) = update.size {
            element.body.set_size(size);
        }
        if let Some(position) = update.position {
            element.position = position;
        }
        if let Some(locked) = update.locked {
            element.locked = locked;
        }
        if let Some(group_id) = update.group_id {
            element.group_id = group_id;
        }
        log::debug!("scene: update {id}");
        true
    }

    /// Remove an element.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let kind = self.kind_of(id)?;
        let collection = self.collections.get_mut(&kind)?;
        let index = collection.iter().position(|e| e.id() == id)?;
        log::debug!("scene: remove {} {}", kind.name(), id);
        Some(collection.remove(index))
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.iter().find(|e| e.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.collections.values_mut().flat_map(|c| c.iter_mut()).find(|e| e.id() == id)
    }

    /// Whether an element with `id` is on the page.
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Kind of the element with `id`, if present.
    pub fn kind_of(&self, id: ElementId) -> Option<ElementKind> {
        self.get(id).map(Element::kind)
    }

    /// All elements in paint order: kind order, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.collections.values().flat_map(|c| c.iter())
    }

    /// Elements of one kind, in insertion order.
    pub fn iter_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.collections.get(&kind).into_iter().flat_map(|c| c.iter())
    }

    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all elements in paint order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.iter().map(Element::id).collect()
    }

    /// Ids of every element tagged with `group`, across all kinds.
    pub fn group_members(&self, group: GroupId) -> Vec<ElementId> {
        self.iter()
            .filter(|e| e.group_id == Some(group))
            .map(Element::id)
            .collect()
    }

    /// Move an element by `delta`. Returns false if absent.
    pub fn translate(&mut self, id: ElementId, delta: Vec2) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Bounding box of an element in page coordinates.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(Element::bounds)
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.collections.clear();
    }
}
