//! Interactive transform protocol: handles, drag and resize gestures.

use crate::camera::Camera;
use crate::elements::{Element, ElementId, ElementKind};
use crate::nodes::{ClientRectOptions, RenderNode};
use crate::scene::{ElementUpdate, Scene};
use crate::selection::Selection;
use crate::snap::{Guide, detect_alignment, snap_to_page_edges};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 16.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 24.0;
/// Resizing never collapses a box below this many page units before the bake.
const MIN_PENDING_EXTENT: f64 = 1.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    /// Edge midpoint.
    Edge(Edge),
}

impl HandleKind {
    /// Corner handles resize proportionally, edge handles stretch one axis.
    pub fn keeps_aspect_ratio(self) -> bool {
        matches!(self, HandleKind::Corner(_))
    }
}

const CORNERS: [HandleKind; 4] = [
    HandleKind::Corner(Corner::TopLeft),
    HandleKind::Corner(Corner::TopRight),
    HandleKind::Corner(Corner::BottomLeft),
    HandleKind::Corner(Corner::BottomRight),
];

/// Handles offered for an element kind.
pub fn handles_for(kind: ElementKind) -> Vec<HandleKind> {
    let mut handles = CORNERS.to_vec();
    match kind {
        ElementKind::QrCode => {}
        ElementKind::Text => {
            handles.extend([HandleKind::Edge(Edge::Left), HandleKind::Edge(Edge::Right)]);
        }
        _ => handles.extend([
            HandleKind::Edge(Edge::Top),
            HandleKind::Edge(Edge::Right),
            HandleKind::Edge(Edge::Bottom),
            HandleKind::Edge(Edge::Left),
        ]),
    }
    handles
}

/// A resize handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in page coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in page coordinates) hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

fn handle_position(bounds: Rect, kind: HandleKind) -> Point {
    let center = bounds.center();
    match kind {
        HandleKind::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
        HandleKind::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
        HandleKind::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
        HandleKind::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
        HandleKind::Edge(Edge::Top) => Point::new(center.x, bounds.y0),
        HandleKind::Edge(Edge::Right) => Point::new(bounds.x1, center.y),
        HandleKind::Edge(Edge::Bottom) => Point::new(center.x, bounds.y1),
        HandleKind::Edge(Edge::Left) => Point::new(bounds.x0, center.y),
    }
}

/// Get the resize handles for an element.
pub fn get_handles(element: &Element) -> Vec<Handle> {
    let bounds = element.bounds();
    handles_for(element.kind())
        .into_iter()
        .map(|kind| Handle::new(handle_position(bounds, kind), kind))
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Snapping inputs for a gesture. Thresholds are in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    pub page: Rect,
    pub page_threshold_px: f64,
    pub guide_threshold_px: f64,
}

/// State of an active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub element: ElementId,
    /// Committed position when the drag started.
    pub origin: Point,
    /// Elements that move with the dragged one and never act as guide targets.
    excluded: Vec<ElementId>,
}

/// State of an active resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub element: ElementId,
    pub handle: HandleKind,
    pub keep_ratio: bool,
    /// Page bounds when the resize started.
    pub original: Rect,
}

/// Non-idle gesture of one element.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Dragging(DragState),
    Resizing(ResizeState),
}

/// Corrected position and guides to draw after a drag step.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFeedback {
    /// Corrected top-left in page coordinates.
    pub position: Point,
    pub guides: Vec<Guide>,
}

/// Transformer configuration for a granted resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeConfig {
    pub handle: HandleKind,
    pub keep_ratio: bool,
    pub min_size: Size,
    /// Always false: elements are never rotated.
    pub rotate_enabled: bool,
}

/// Per-element gesture state machines.
#[derive(Debug, Clone, Default)]
pub struct TransformController {
    gestures: HashMap<ElementId, Gesture>,
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gesture in progress on `id`.
    pub fn gesture(&self, id: ElementId) -> Option<&Gesture> {
        self.gestures.get(&id)
    }

    pub fn is_idle(&self, id: ElementId) -> bool {
        !self.gestures.contains_key(&id)
    }

    /// Abandon any gesture on `id` without committing.
    pub fn cancel(&mut self, id: ElementId) {
        self.gestures.remove(&id);
    }

    /// Start dragging `id`.
    ///
    /// Refused for missing or locked elements, for elements whose group has a
    /// locked member, and while another gesture is active on the element.
    pub fn begin_drag(&mut self, scene: &Scene, selection: &Selection, id: ElementId) -> bool {
        let Some(element) = scene.get(id) else {
            return false;
        };
        if !self.is_idle(id) {
            return false;
        }
        let group = element.group_id.map(|g| scene.group_members(g)).unwrap_or_default();
        let locked_member = group.iter().filter_map(|&m| scene.get(m)).any(|m| m.locked);
        if element.locked || locked_member {
            log::warn!("transform: drag refused for locked element {id}");
            return false;
        }

        let mut excluded = vec![id];
        for member in group.into_iter().chain(selection.members().iter().copied()) {
            if !excluded.contains(&member) {
                excluded.push(member);
            }
        }
        log::debug!("transform: drag start {id}");
        self.gestures.insert(
            id,
            Gesture::Dragging(DragState {
                element: id,
                origin: element.position,
                excluded,
            }),
        );
        true
    }

    /// Apply page-edge snap and alignment guides to the node's current position.
    ///
    /// The node is moved to the corrected position. Returns None if `id` is
    /// not being dragged.
    pub fn drag_move(
        &self,
        scene: &Scene,
        id: ElementId,
        node: &mut dyn RenderNode,
        camera: &Camera,
        settings: &SnapSettings,
    ) -> Option<DragFeedback> {
        let Some(Gesture::Dragging(state)) = self.gestures.get(&id) else {
            return None;
        };

        let rect = node.client_rect(ClientRectOptions::PAGE);
        let size = scene.get(id).map_or(rect.size(), Element::size);
        let page_threshold = camera.page_threshold(settings.page_threshold_px);
        let edge = snap_to_page_edges(rect.origin(), size, settings.page, page_threshold);
        let rect = Rect::from_origin_size(edge.position, size);

        let targets: Vec<Rect> = scene
            .iter()
            .filter(|e| !state.excluded.contains(&e.id()))
            .map(Element::bounds)
            .collect();
        let alignment = detect_alignment(
            rect,
            &targets,
            settings.page,
            camera.page_threshold(settings.guide_threshold_px),
        );

        let position = rect.origin() + alignment.offset;
        node.set_absolute_position(camera.page_to_screen(position));
        Some(DragFeedback {
            position,
            guides: alignment.guides,
        })
    }

    /// Commit a drag from the node's final position.
    ///
    /// Other members of the element's group are shifted by the same delta.
    /// Returns the committed delta, or None if `id` was not being dragged.
    pub fn drag_end(
        &mut self,
        scene: &mut Scene,
        id: ElementId,
        node: &mut dyn RenderNode,
        camera: &Camera,
        settings: &SnapSettings,
    ) -> Option<Vec2> {
        match self.gestures.remove(&id) {
            Some(Gesture::Dragging(_)) => {}
            Some(other) => {
                self.gestures.insert(id, other);
                return None;
            }
            None => return None,
        }
        let element = scene.get(id)?;
        let group = element.group_id;
        let before = element.position;
        let size = element.size();

        let origin = node.client_rect(ClientRectOptions::PAGE).origin();
        let page_threshold = camera.page_threshold(settings.page_threshold_px);
        let position = snap_to_page_edges(origin, size, settings.page, page_threshold).position;
        let delta = position - before;

        scene.update(id, ElementUpdate::new().position(position));
        node.set_absolute_position(camera.page_to_screen(position));
        if let Some(group) = group {
            for member in scene.group_members(group) {
                if member != id {
                    scene.translate(member, delta);
                }
            }
        }
        log::debug!("transform: drag end {id} by ({}, {})", delta.x, delta.y);
        Some(delta)
    }

    /// Start resizing `id` from `handle`.
    ///
    /// Refused for missing or locked elements and for handles the kind does not offer.
    pub fn begin_resize(&mut self, scene: &Scene, id: ElementId, handle: HandleKind) -> Option<ResizeConfig> {
        let element = scene.get(id)?;
        if element.locked {
            log::warn!("transform: resize refused for locked element {id}");
            return None;
        }
        if !self.is_idle(id) || !handles_for(element.kind()).contains(&handle) {
            return None;
        }
        let keep_ratio = handle.keeps_aspect_ratio();
        log::debug!("transform: resize start {id} from {handle:?}");
        self.gestures.insert(
            id,
            Gesture::Resizing(ResizeState {
                element: id,
                handle,
                keep_ratio,
                original: element.bounds(),
            }),
        );
        Some(ResizeConfig {
            handle,
            keep_ratio,
            min_size: element.kind().min_size(),
            rotate_enabled: false,
        })
    }

    /// Follow the pointer (page coordinates) with the grabbed handle.
    ///
    /// Updates the node's pending scale and position; nothing is committed.
    pub fn resize_move(&self, id: ElementId, node: &mut dyn RenderNode, camera: &Camera, pointer: Point) -> bool {
        let Some(Gesture::Resizing(state)) = self.gestures.get(&id) else {
            return false;
        };
        let rect = resized_rect(state, pointer);
        let original = state.original;
        node.set_scale(Vec2::new(rect.width() / original.width(), rect.height() / original.height()));
        node.set_absolute_position(camera.page_to_screen(rect.origin()));
        true
    }

    /// Bake the node's pending scale into the element.
    ///
    /// The scale becomes explicit dimensions clamped to the kind minimum, the
    /// resulting box is snapped to the page edges and the node is reset to
    /// scale 1.
    pub fn resize_end(
        &mut self,
        scene: &mut Scene,
        id: ElementId,
        node: &mut dyn RenderNode,
        camera: &Camera,
        settings: &SnapSettings,
    ) -> bool {
        match self.gestures.remove(&id) {
            Some(Gesture::Resizing(_)) => {}
            Some(other) => {
                self.gestures.insert(id, other);
                return false;
            }
            None => return false,
        }
        let Some(element) = scene.get_mut(id) else {
            return false;
        };

        // Snap the baked box, not the pending one.
        let origin = node.client_rect(ClientRectOptions::PAGE).origin();
        element.body.apply_scale(node.scale());
        let size = element.size();
        let page_threshold = camera.page_threshold(settings.page_threshold_px);
        let position = snap_to_page_edges(origin, size, settings.page, page_threshold).position;
        element.position = position;

        node.set_scale(Vec2::new(1.0, 1.0));
        node.set_size(size);
        node.set_absolute_position(camera.page_to_screen(position));
        log::debug!("transform: resize end {id} to {}x{}", size.width, size.height);
        true
    }
}

/// Rectangle the grabbed handle describes when held at `pointer`.
fn resized_rect(state: &ResizeState, pointer: Point) -> Rect {
    let original = state.original;
    let (w, h) = (original.width().max(MIN_PENDING_EXTENT), original.height().max(MIN_PENDING_EXTENT));
    match state.handle {
        HandleKind::Corner(corner) => {
            let anchor = match corner {
                Corner::TopLeft => Point::new(original.x1, original.y1),
                Corner::TopRight => Point::new(original.x0, original.y1),
                Corner::BottomLeft => Point::new(original.x1, original.y0),
                Corner::BottomRight => Point::new(original.x0, original.y0),
            };
            let dx = match corner {
                Corner::TopLeft | Corner::BottomLeft => anchor.x - pointer.x,
                Corner::TopRight | Corner::BottomRight => pointer.x - anchor.x,
            };
            let dy = match corner {
                Corner::TopLeft | Corner::TopRight => anchor.y - pointer.y,
                Corner::BottomLeft | Corner::BottomRight => pointer.y - anchor.y,
            };
            let (mut sx, mut sy) = (dx.max(MIN_PENDING_EXTENT) / w, dy.max(MIN_PENDING_EXTENT) / h);
            if state.keep_ratio {
                let s = sx.max(sy);
                sx = s;
                sy = s;
            }
            let size = Size::new(w * sx, h * sy);
            let x0 = match corner {
                Corner::TopLeft | Corner::BottomLeft => anchor.x - size.width,
                Corner::TopRight | Corner::BottomRight => anchor.x,
            };
            let y0 = match corner {
                Corner::TopLeft | Corner::TopRight => anchor.y - size.height,
                Corner::BottomLeft | Corner::BottomRight => anchor.y,
            };
            Rect::from_origin_size((x0, y0), size)
        }
        HandleKind::Edge(Edge::Left) => {
            let width = (original.x1 - pointer.x).max(MIN_PENDING_EXTENT);
            Rect::new(original.x1 - width, original.y0, original.x1, original.y1)
        }
        HandleKind::Edge(Edge::Right) => {
            let width = (pointer.x - original.x0).max(MIN_PENDING_EXTENT);
            Rect::new(original.x0, original.y0, original.x0 + width, original.y1)
        }
        HandleKind::Edge(Edge::Top) => {
            let height = (original.y1 - pointer.y).max(MIN_PENDING_EXTENT);
            Rect::new(original.x0, original.y1 - height, original.x1, original.y1)
        }
        HandleKind::Edge(Edge::Bottom) => {
            let height = (pointer.y - original.y0).max(MIN_PENDING_EXTENT);
            Rect::new(original.x0, original.y0, original.x1, original.y0 + height)
        }
    }
}
