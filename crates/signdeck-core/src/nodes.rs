//! Rendering collaborator interface and the weak node index.
//!
//! The renderer owns its nodes. The editor only keeps weak handles to them,
//! so a node that was unmounted simply stops resolving.

use crate::camera::Camera;
use crate::elements::ElementId;
use crate::scene::Scene;
use kurbo::{Point, Rect, Size, Vec2};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Options for [`RenderNode::client_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientRectOptions {
    /// Report the rect in page coordinates instead of screen coordinates.
    pub relative_to_page: bool,
    pub skip_stroke: bool,
    pub skip_shadow: bool,
}

impl ClientRectOptions {
    /// Bare geometry in page coordinates, used for snapping and commits.
    pub const PAGE: Self = Self {
        relative_to_page: true,
        skip_stroke: true,
        skip_shadow: true,
    };
}

/// A drawable node mirroring one element.
pub trait RenderNode {
    /// Bounding box of the node, scale included.
    fn client_rect(&self, options: ClientRectOptions) -> Rect;

    /// Top-left corner in screen coordinates.
    fn absolute_position(&self) -> Point;

    fn set_absolute_position(&mut self, position: Point);

    /// Pending transform scale. 1 when no resize is in progress.
    fn scale(&self) -> Vec2;

    fn set_scale(&mut self, scale: Vec2);

    /// Unscaled size in page units.
    fn set_size(&mut self, size: Size);
}

/// Non-owning id to node lookup.
#[derive(Debug)]
pub struct NodeIndex<N> {
    nodes: HashMap<ElementId, Weak<RefCell<N>>>,
}

impl<N> Default for NodeIndex<N> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }
}

impl<N: RenderNode> NodeIndex<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node after the renderer mounted it.
    pub fn mount(&mut self, id: ElementId, node: &Rc<RefCell<N>>) {
        self.nodes.insert(id, Rc::downgrade(node));
    }

    /// Forget a node, usually right before the renderer destroys it.
    pub fn unmount(&mut self, id: ElementId) {
        self.nodes.remove(&id);
    }

    /// Live node for `id`, if it is still mounted.
    pub fn get(&self, id: ElementId) -> Option<Rc<RefCell<N>>> {
        self.nodes.get(&id)?.upgrade()
    }

    /// Drop entries whose node has been released.
    pub fn prune(&mut self) {
        self.nodes.retain(|_, node| node.strong_count() > 0);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Push store geometry into every live node.
    pub fn sync_from_scene(&self, scene: &Scene, camera: &Camera) {
        for element in scene.iter() {
            let Some(node) = self.get(element.id()) else {
                continue;
            };
            let mut node = node.borrow_mut();
            node.set_scale(Vec2::new(1.0, 1.0));
            node.set_size(element.size());
            node.set_absolute_position(camera.page_to_screen(element.position));
        }
    }
}

/// Renderer-free node, used by hosts without a drawing surface and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
    camera: Camera,
    /// Top-left in page coordinates.
    position: Point,
    size: Size,
    scale: Vec2,
}

impl HeadlessNode {
    pub fn new(camera: Camera, position: Point, size: Size) -> Self {
        Self {
            camera,
            position,
            size,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Top-left in page coordinates.
    pub fn page_position(&self) -> Point {
        self.position
    }

    /// Move the node to a page position, as a pointer drag would.
    pub fn drag_to(&mut self, page_position: Point) {
        self.position = page_position;
    }
}

impl RenderNode for HeadlessNode {
    fn client_rect(&self, options: ClientRectOptions) -> Rect {
        let size = Size::new(self.size.width * self.scale.x, self.size.height * self.scale.y);
        let rect = Rect::from_origin_size(self.position, size);
        if options.relative_to_page {
            rect
        } else {
            self.camera.transform().transform_rect_bbox(rect)
        }
    }

    fn absolute_position(&self) -> Point {
        self.camera.page_to_screen(self.position)
    }

    fn set_absolute_position(&mut self, position: Point) {
        self.position = self.camera.screen_to_page(position);
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
