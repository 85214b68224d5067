//! Runtime editor state: scene, selection, viewport, clipboard and gestures.

use crate::assets::{AssetState, AssetTracker, LoadOutcome, LoadTicket};
use crate::camera::Camera;
use crate::clipboard::{Clipboard, ElementTemplate, duplicate_all};
use crate::config::EditorConfig;
use crate::elements::{
    Clock, Element, ElementBody, ElementId, ElementKind, GroupId, MediaUpload, QrCode, ShapeElement, ShapeType, Text,
    Weather, WebPage, YouTube,
};
use crate::export::export_scene;
use crate::nodes::RenderNode;
use crate::scene::{ElementUpdate, Scene};
use crate::selection::{Selection, resolve_click, toggle_lock_target, touched_groups};
use crate::shortcuts::{Command, Modifiers, ShortcutRegistry};
use crate::transform::{DragFeedback, HandleKind, ResizeConfig, TransformController};
use kurbo::{Point, Size, Vec2};
use uuid::Uuid;

/// Editor state for one artboard.
#[derive(Debug, Clone)]
pub struct Canvas {
    scene: Scene,
    selection: Selection,
    /// Camera for view transform.
    pub camera: Camera,
    transforms: TransformController,
    clipboard: Clipboard,
    assets: AssetTracker,
    config: EditorConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a canvas for the given page and snap configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(),
            selection: Selection::new(),
            camera: Camera::new(),
            transforms: TransformController::new(),
            clipboard: Clipboard::new(),
            assets: AssetTracker::new(),
            config,
        }
    }

    /// All elements, grouped by kind in paint order.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current selection. The primary member is the one the property panel edits.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Last copied element, if any.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Per-element gesture state.
    pub fn transforms(&self) -> &TransformController {
        &self.transforms
    }

    /// Fit the page into a viewport of the given size.
    pub fn fit_page(&mut self, viewport: Size) {
        self.camera.fit_page(self.config.page_rect(), viewport, 40.0);
    }

    // --- Creation ---

    /// Add an element centered on the page. It becomes the sole selection.
    pub fn add(&mut self, body: ElementBody) -> ElementId {
        let size = body.size();
        let center = self.config.page_rect().center();
        let position = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        let id = self.scene.add(Element::new(position, body));
        self.selection.set(vec![id]);
        id
    }

    /// Add a placeholder text element.
    pub fn add_text(&mut self) -> ElementId {
        self.add(ElementBody::Text(Text::new(Text::DEFAULT_TEXT)))
    }

    /// Returns None for a blank url.
    pub fn add_web_page(&mut self, url: &str) -> Option<ElementId> {
        let page = WebPage::new(url);
        if page.is_none() {
            log::warn!("canvas: refusing web page without url");
        }
        Some(self.add(ElementBody::WebPage(page?)))
    }

    /// Returns None for a blank video source.
    pub fn add_youtube(&mut self, source: &str) -> Option<ElementId> {
        let video = YouTube::new(source);
        if video.is_none() {
            log::warn!("canvas: refusing video without source");
        }
        Some(self.add(ElementBody::YouTube(video?)))
    }

    /// Returns None for empty text.
    pub fn add_qr_code(&mut self, text: &str) -> Option<ElementId> {
        let qr = QrCode::new(text);
        if qr.is_none() {
            log::warn!("canvas: refusing QR code without text");
        }
        Some(self.add(ElementBody::QrCode(qr?)))
    }

    /// Add a shape of `shape_type` at its default size and fill.
    pub fn add_shape(&mut self, shape_type: ShapeType) -> ElementId {
        self.add(ElementBody::Shape(ShapeElement::new(shape_type)))
    }

    pub fn add_clock(&mut self) -> ElementId {
        self.add(ElementBody::Clock(Clock::default()))
    }

    /// Add a weather widget for `city` in `country`.
    pub fn add_weather(&mut self, city: &str, country: &str) -> ElementId {
        self.add(ElementBody::Weather(Weather::new(city, country)))
    }

    /// Place an uploaded file at its reported size.
    pub fn add_media(&mut self, upload: MediaUpload) -> ElementId {
        self.add(ElementBody::Media(upload.into()))
    }

    /// Insert a fully specified element without touching the selection.
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.scene.add(element)
    }

    // --- Editing ---

    /// Merge a partial update. Returns false if the element is absent.
    ///
    /// A change of raster source marks loads in flight as stale.
    pub fn update(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        let before = self
            .scene
            .get(id)
            .and_then(|e| e.body.raster_source().map(str::to_owned));
        if !self.scene.update(id, update) {
            return false;
        }
        let after = self.scene.get(id).and_then(|e| e.body.raster_source());
        if before.as_deref() != after {
            self.assets.invalidate(id);
        }
        true
    }

    /// Remove an element and evict it from the selection.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.scene.remove(id)?;
        self.selection.remove(id);
        self.transforms.cancel(id);
        self.assets.forget(id);
        Some(element)
    }

    // --- Selection ---

    /// Panel selection of the primary element of `kind`.
    ///
    /// `None` clears the primary if it is of that kind.
    pub fn select(&mut self, kind: ElementKind, id: Option<ElementId>) {
        match id {
            Some(id) if self.scene.kind_of(id) != Some(kind) => {
                log::warn!("canvas: {id} is not a {} element", kind.name());
            }
            Some(id) => self.selection.focus(Some(id)),
            None => {
                if self.selection.primary_of_kind(&self.scene, kind).is_some() {
                    self.selection.focus(None);
                }
            }
        }
    }

    /// Click selection: the element, or its whole group.
    pub fn select_one(&mut self, id: ElementId) {
        let members = resolve_click(&self.scene, id);
        if !members.is_empty() {
            self.selection.set(members);
        }
    }

    /// Select every element in paint order.
    ///
    /// The first element in paint order becomes the primary.
    pub fn select_all(&mut self) {
        self.selection.set(self.scene.ids());
    }

    /// Deselect everything, including the primary.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Tag the selection with a fresh group id. Needs at least two elements.
    pub fn group_selected(&mut self) -> Option<GroupId> {
        if self.selection.len() < 2 {
            return None;
        }
        let group = Uuid::new_v4();
        for &id in self.selection.members() {
            self.scene.update(id, ElementUpdate::new().group(Some(group)));
        }
        log::debug!("canvas: grouped {} elements as {group}", self.selection.len());
        Some(group)
    }

    /// Dissolve every group the selection touches, including unselected members.
    ///
    /// Returns the number of elements whose tag was cleared.
    pub fn ungroup_selected(&mut self) -> usize {
        let groups = touched_groups(&self.scene, self.selection.members());
        if groups.is_empty() {
            return 0;
        }
        let mut cleared = 0;
        for group in groups {
            for id in self.scene.group_members(group) {
                self.scene.update(id, ElementUpdate::new().group(None));
                cleared += 1;
            }
        }
        log::debug!("canvas: ungrouped {cleared} elements");
        cleared
    }

    /// Lock the selection if any member is unlocked, otherwise unlock it.
    ///
    /// Returns the applied lock state, or None for an empty selection.
    pub fn toggle_lock(&mut self) -> Option<bool> {
        if self.selection.is_empty() {
            return None;
        }
        let locked = toggle_lock_target(&self.scene, self.selection.members());
        for &id in self.selection.members() {
            self.scene.update(id, ElementUpdate::new().locked(locked));
        }
        Some(locked)
    }

    /// Remove every selected element. Locked elements are removed too.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.members().to_vec();
        ids.into_iter().filter(|&id| self.remove(id).is_some()).count()
    }

    // --- Clipboard ---

    fn copy_source(&self) -> Option<ElementId> {
        self.selection.primary().or_else(|| self.selection.members().first().copied())
    }

    /// Copy the primary selected element.
    pub fn copy(&mut self) -> bool {
        let Some(element) = self.copy_source().and_then(|id| self.scene.get(id)) else {
            return false;
        };
        self.clipboard.copy(element);
        true
    }

    /// Paste the clipboard entry. The copy becomes the sole selection.
    pub fn paste(&mut self) -> Option<ElementId> {
        let element = self.clipboard.paste(self.config.paste_offset)?;
        let id = self.scene.add(element);
        self.selection.set(vec![id]);
        Some(id)
    }

    /// Duplicate the selection without touching the clipboard.
    ///
    /// Multi-selection copies are staggered and ungrouped; they become the selection.
    pub fn duplicate(&mut self) -> Vec<ElementId> {
        let offset = self.config.paste_offset;
        let copies = if self.selection.len() == 1 {
            self.copy_source()
                .and_then(|id| self.scene.get(id))
                .map(|e| vec![ElementTemplate::from_element(e).instantiate(Vec2::new(offset, offset))])
                .unwrap_or_default()
        } else {
            let members = self.selection.members();
            duplicate_all(members.iter().filter_map(|&id| self.scene.get(id)), offset)
        };
        if copies.is_empty() {
            return Vec::new();
        }
        let ids: Vec<ElementId> = copies.into_iter().map(|e| self.scene.add(e)).collect();
        self.selection.set(ids.clone());
        ids
    }

    // --- Gestures ---

    /// Start a drag on `id`. Returns false when the element or its group is locked.
    pub fn begin_drag(&mut self, id: ElementId) -> bool {
        self.transforms.begin_drag(&self.scene, &self.selection, id)
    }

    /// Snap the node's live position and report alignment guides.
    ///
    /// Only the node is moved. The scene is updated by `drag_end`.
    pub fn drag_move(&self, id: ElementId, node: &mut dyn RenderNode) -> Option<DragFeedback> {
        let settings = self.config.snap_settings();
        self.transforms.drag_move(&self.scene, id, node, &self.camera, &settings)
    }

    /// Commit the drag to the scene. Group members move by the returned delta.
    pub fn drag_end(&mut self, id: ElementId, node: &mut dyn RenderNode) -> Option<Vec2> {
        let settings = self.config.snap_settings();
        self.transforms
            .drag_end(&mut self.scene, id, node, &self.camera, &settings)
    }

    /// Start a resize from `handle`. Locked and missing elements give None.
    pub fn begin_resize(&mut self, id: ElementId, handle: HandleKind) -> Option<ResizeConfig> {
        self.transforms.begin_resize(&self.scene, id, handle)
    }

    /// `pointer` is in screen coordinates.
    pub fn resize_move(&self, id: ElementId, node: &mut dyn RenderNode, pointer: Point) -> bool {
        let pointer = self.camera.screen_to_page(pointer);
        self.transforms.resize_move(id, node, &self.camera, pointer)
    }

    /// Bake the pending scale into the element size and snap it to the page.
    pub fn resize_end(&mut self, id: ElementId, node: &mut dyn RenderNode) -> bool {
        let settings = self.config.snap_settings();
        self.transforms
            .resize_end(&mut self.scene, id, node, &self.camera, &settings)
    }

    // --- Assets ---

    /// Start a raster load for an element that has a raster source.
    pub fn begin_asset_load(&mut self, id: ElementId) -> Option<LoadTicket> {
        self.scene.get(id)?.body.raster_source()?;
        Some(self.assets.begin(id))
    }

    /// Apply a finished load. Stale results are dropped.
    pub fn complete_asset_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        self.scene.contains(ticket.element) && self.assets.complete(ticket, outcome)
    }

    /// Raster load state of an element, if a load was started.
    pub fn asset_state(&self, id: ElementId) -> Option<&AssetState> {
        self.assets.state(id)
    }

    // --- Export & keyboard ---

    /// Render the page as playback XML.
    pub fn export_xml(&self) -> String {
        export_scene(&self.scene, &self.config)
    }

    /// Run a keyboard command against the current selection.
    pub fn execute(&mut self, command: Command) {
        log::debug!("canvas: {command:?}");
        match command {
            Command::SelectAll => self.select_all(),
            Command::Group => {
                self.group_selected();
            }
            Command::Ungroup => {
                self.ungroup_selected();
            }
            Command::ToggleLock => {
                self.toggle_lock();
            }
            Command::Copy => {
                self.copy();
            }
            Command::Paste => {
                self.paste();
            }
            Command::Duplicate => {
                self.duplicate();
            }
            Command::Delete => {
                self.delete_selected();
            }
        }
    }

    /// Run the command bound to a key press, if any.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers, text_focus: bool) -> Option<Command> {
        let command = ShortcutRegistry::resolve(key, modifiers, text_focus)?;
        self.execute(command);
        Some(command)
    }
}
