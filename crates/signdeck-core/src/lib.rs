//! SignDeck Core Library
//!
//! Scene, selection and transform engine for the SignDeck signage layout
//! editor, plus the export to the playback XML format.

pub mod assets;
pub mod camera;
pub mod canvas;
pub mod clipboard;
pub mod config;
pub mod elements;
pub mod export;
pub mod nodes;
pub mod scene;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod transform;

pub use assets::{AssetState, AssetTracker, LoadOutcome, LoadTicket, RasterInfo};
pub use camera::Camera;
pub use canvas::Canvas;
pub use clipboard::{Clipboard, ElementTemplate, PASTE_OFFSET};
pub use config::{ConfigError, EditorConfig};
pub use elements::{Element, ElementBody, ElementId, ElementKind, GroupId};
pub use export::export_scene;
pub use nodes::{ClientRectOptions, HeadlessNode, NodeIndex, RenderNode};
pub use scene::{ElementUpdate, Scene};
pub use selection::Selection;
pub use shortcuts::{Command, Modifiers, ShortcutRegistry};
pub use snap::{AlignmentResult, Guide, SnapResult, detect_alignment, snap_to_page_edges};
pub use transform::{Corner, DragFeedback, Edge, HandleKind, ResizeConfig, SnapSettings, TransformController};
