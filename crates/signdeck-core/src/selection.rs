//! Selection set and grouping rules.
//!
//! The multi-select set is the only selection state. The element a property
//! panel edits is its `primary`, and a per-kind view is derived from that.

use crate::elements::{Element, ElementId, ElementKind, GroupId};
use crate::scene::Scene;

/// The current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    members: Vec<ElementId>,
    primary: Option<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection. The first id becomes the primary.
    pub fn set(&mut self, ids: Vec<ElementId>) {
        let mut members: Vec<ElementId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        self.primary = members.first().copied();
        self.members = members;
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.primary = None;
    }

    /// Evict an element, clearing the primary if it pointed there.
    pub fn remove(&mut self, id: ElementId) {
        self.members.retain(|&m| m != id);
        if self.primary == Some(id) {
            self.primary = None;
        }
    }

    /// Panel-driven selection of a single element.
    ///
    /// With at most one member the set follows `id`. With two or more the set
    /// is kept and only the primary moves.
    pub fn focus(&mut self, id: Option<ElementId>) {
        if self.members.len() <= 1 {
            self.members = id.into_iter().collect();
        }
        self.primary = id;
    }

    /// Selected ids in the order they were set, without duplicates.
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    /// Member the property panel edits.
    pub fn primary(&self) -> Option<ElementId> {
        self.primary
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The primary element if it is of `kind`.
    pub fn primary_of_kind(&self, scene: &Scene, kind: ElementKind) -> Option<ElementId> {
        self.primary.filter(|&id| scene.kind_of(id) == Some(kind))
    }
}

/// Elements a click on `id` selects: the whole group if it has one.
///
/// Returns an empty list for a missing element.
pub fn resolve_click(scene: &Scene, id: ElementId) -> Vec<ElementId> {
    match scene.get(id) {
        Some(Element {
            group_id: Some(group), ..
        }) => scene.group_members(*group),
        Some(_) => vec![id],
        None => Vec::new(),
    }
}

/// Distinct group ids carried by `ids`, in first-seen order.
pub fn touched_groups(scene: &Scene, ids: &[ElementId]) -> Vec<GroupId> {
    let mut groups = Vec::new();
    for group in ids.iter().filter_map(|&id| scene.get(id)?.group_id) {
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

/// Lock state a toggle should apply: lock if any element is unlocked.
pub fn toggle_lock_target(scene: &Scene, ids: &[ElementId]) -> bool {
    ids.iter()
        .filter_map(|&id| scene.get(id))
        .any(|element| !element.locked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementBody, ShapeElement, ShapeType, Text};
    use kurbo::Point;
    use uuid::Uuid;

    fn shape() -> Element {
        Element::new(Point::ZERO, ElementBody::Shape(ShapeElement::new(ShapeType::Circle)))
    }

    #[test]
    fn test_set_dedups_and_sets_primary() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.set(vec![a, b, a]);
        assert_eq!(selection.members(), &[a, b]);
        assert_eq!(selection.primary(), Some(a));
    }

    #[test]
    fn test_remove_clears_primary() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.set(vec![a, b]);
        selection.remove(a);
        assert_eq!(selection.members(), &[b]);
        assert_eq!(selection.primary(), None);
    }

    #[test]
    fn test_focus_resyncs_single() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.set(vec![a]);
        selection.focus(Some(b));
        assert_eq!(selection.members(), &[b]);
        assert_eq!(selection.primary(), Some(b));
        selection.focus(None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_focus_keeps_multi() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.set(vec![a, b]);
        selection.focus(Some(c));
        assert_eq!(selection.members(), &[a, b]);
        assert_eq!(selection.primary(), Some(c));
    }

    #[test]
    fn test_resolve_click_expands_group() {
        let mut scene = Scene::new();
        let group = Uuid::new_v4();
        let mut a = shape();
        a.group_id = Some(group);
        let mut t = Element::new(Point::ZERO, ElementBody::Text(Text::new("x")));
        t.group_id = Some(group);
        let a = scene.add(a);
        let t = scene.add(t);
        let lone = scene.add(shape());

        assert_eq!(resolve_click(&scene, a), vec![t, a]);
        assert_eq!(resolve_click(&scene, lone), vec![lone]);
        assert!(resolve_click(&scene, Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_primary_of_kind() {
        let mut scene = Scene::new();
        let id = scene.add(shape());
        let mut selection = Selection::new();
        selection.set(vec![id]);
        assert_eq!(selection.primary_of_kind(&scene, ElementKind::Shape), Some(id));
        assert_eq!(selection.primary_of_kind(&scene, ElementKind::Text), None);
    }

    #[test]
    fn test_touched_groups_and_lock_target() {
        let mut scene = Scene::new();
        let group = Uuid::new_v4();
        let mut a = shape();
        a.group_id = Some(group);
        let mut b = shape();
        b.group_id = Some(group);
        b.locked = true;
        let a = scene.add(a);
        let b = scene.add(b);
        let c = scene.add(shape());

        assert_eq!(touched_groups(&scene, &[a, b, c]), vec![group]);
        assert!(toggle_lock_target(&scene, &[a, b]));
        assert!(!toggle_lock_target(&scene, &[b]));
    }
}
