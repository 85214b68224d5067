//! Element definitions for the signage artboard.

/// Implements `BodyTrait` for a body stored as plain `width` and `height`
/// fields, clamped to the type's `MIN_SIZE`.
macro_rules! boxed_body {
    ($ty:ty, $kind:expr) => {
        impl $crate::elements::BodyTrait for $ty {
            fn kind(&self) -> $crate::elements::ElementKind {
                $kind
            }

            fn size(&self) -> ::kurbo::Size {
                ::kurbo::Size::new(self.width, self.height)
            }

            fn set_size(&mut self, size: ::kurbo::Size) {
                let size = $crate::elements::clamp_size(size, Self::MIN_SIZE);
                self.width = size.width;
                self.height = size.height;
            }

            fn apply_scale(&mut self, scale: ::kurbo::Vec2) {
                let size = $crate::elements::scale_box(self.size(), scale, Self::MIN_SIZE);
                self.width = size.width;
                self.height = size.height;
            }
        }
    };
}

mod media;
mod qr_code;
mod shape;
mod text;
mod web_page;
mod widget;

pub use media::{Media, MediaKind, MediaUpload};
pub use qr_code::QrCode;
pub use shape::{ShapeElement, ShapeOutline, ShapeType};
pub use text::{FontStyle, HorizontalAlign, ScrollMode, Text, TextDecoration};
pub use web_page::WebPage;
pub use widget::{Clock, Weather, WidgetTheme, YouTube};

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Tag shared by the members of a group.
pub type GroupId = Uuid;

/// Element kinds, declared in export/paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    WebPage,
    #[serde(rename = "youtube")]
    YouTube,
    QrCode,
    Weather,
    Clock,
    Shape,
    Media,
}

impl ElementKind {
    /// Every kind, in the fixed kind order used for painting and export.
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Text,
        ElementKind::WebPage,
        ElementKind::YouTube,
        ElementKind::QrCode,
        ElementKind::Weather,
        ElementKind::Clock,
        ElementKind::Shape,
        ElementKind::Media,
    ];

    /// Wire name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::WebPage => "web_page",
            ElementKind::YouTube => "youtube",
            ElementKind::QrCode => "qr_code",
            ElementKind::Weather => "weather",
            ElementKind::Clock => "clock",
            ElementKind::Shape => "shape",
            ElementKind::Media => "media",
        }
    }

    /// Smallest size an interactive transform may leave behind.
    ///
    /// Text only constrains its width; its height follows the font size.
    pub fn min_size(self) -> Size {
        match self {
            ElementKind::Text => Size::new(Text::MIN_WIDTH, 0.0),
            ElementKind::WebPage => WebPage::MIN_SIZE,
            ElementKind::YouTube => YouTube::MIN_SIZE,
            ElementKind::QrCode => Size::new(QrCode::MIN_SIZE, QrCode::MIN_SIZE),
            ElementKind::Weather => Weather::MIN_SIZE,
            ElementKind::Clock => Clock::MIN_SIZE,
            ElementKind::Shape => ShapeElement::MIN_SIZE,
            ElementKind::Media => Media::MIN_SIZE,
        }
    }
}

/// Behaviour shared by every element body.
pub trait BodyTrait {
    /// The kind this body belongs to.
    fn kind(&self) -> ElementKind;

    /// Size of the element in page units.
    fn size(&self) -> Size;

    /// Set an explicit size, clamped to the kind minimum.
    fn set_size(&mut self, size: Size);

    /// Bake a transform scale into the body's own dimensions.
    /// Minimums are applied to the scaled result.
    fn apply_scale(&mut self, scale: Vec2);
}

/// Scale a plain width/height box and clamp it to `min`.
pub(crate) fn scale_box(size: Size, scale: Vec2, min: Size) -> Size {
    clamp_size(Size::new(size.width * scale.x, size.height * scale.y), min)
}

/// Clamp a width/height box to `min`.
pub(crate) fn clamp_size(size: Size, min: Size) -> Size {
    Size::new(size.width.max(min.width), size.height.max(min.height))
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementBody {
    Text(Text),
    WebPage(WebPage),
    #[serde(rename = "youtube")]
    YouTube(YouTube),
    QrCode(QrCode),
    Weather(Weather),
    Clock(Clock),
    Shape(ShapeElement),
    Media(Media),
}

impl ElementBody {
    fn as_body(&self) -> &dyn BodyTrait {
        match self {
            ElementBody::Text(b) => b,
            ElementBody::WebPage(b) => b,
            ElementBody::YouTube(b) => b,
            ElementBody::QrCode(b) => b,
            ElementBody::Weather(b) => b,
            ElementBody::Clock(b) => b,
            ElementBody::Shape(b) => b,
            ElementBody::Media(b) => b,
        }
    }

    fn as_body_mut(&mut self) -> &mut dyn BodyTrait {
        match self {
            ElementBody::Text(b) => b,
            ElementBody::WebPage(b) => b,
            ElementBody::YouTube(b) => b,
            ElementBody::QrCode(b) => b,
            ElementBody::Weather(b) => b,
            ElementBody::Clock(b) => b,
            ElementBody::Shape(b) => b,
            ElementBody::Media(b) => b,
        }
    }

    /// Kind tag of the body.
    pub fn kind(&self) -> ElementKind {
        self.as_body().kind()
    }

    /// Box size in page units.
    pub fn size(&self) -> Size {
        self.as_body().size()
    }

    /// Set the box size, raised to the kind minimum.
    pub fn set_size(&mut self, size: Size) {
        self.as_body_mut().set_size(size);
    }

    /// Bake a transform scale into the size fields.
    pub fn apply_scale(&mut self, scale: Vec2) {
        self.as_body_mut().apply_scale(scale);
    }

    /// Name of the required field left blank, if any.
    ///
    /// Applies the same refusals as `WebPage::new`, `YouTube::new` and `QrCode::new`.
    pub fn blank_payload(&self) -> Option<&'static str> {
        match self {
            ElementBody::WebPage(page) if WebPage::new(page.url.as_str()).is_none() => Some("url"),
            ElementBody::YouTube(video) if YouTube::new(video.source.as_str()).is_none() => Some("source"),
            ElementBody::QrCode(qr) if QrCode::new(qr.text.as_str()).is_none() => Some("text"),
            _ => None,
        }
    }

    /// Raise dimensions below the kind minimum, as a transform would.
    ///
    /// Auto-sized text keeps its content width; only the font range and an
    /// explicit width are enforced.
    pub fn clamp_to_minimum(&mut self) {
        match self {
            ElementBody::Text(text) => text.clamp_to_minimum(),
            body => {
                let size = body.size();
                body.set_size(size);
            }
        }
    }

    /// Source whose raster (thumbnail, QR bitmap) the renderer decodes, if any.
    pub fn raster_source(&self) -> Option<&str> {
        match self {
            ElementBody::Media(media) => Some(media.source.as_deref().unwrap_or(media.name.as_str())),
            ElementBody::QrCode(qr) => Some(qr.text.as_str()),
            ElementBody::WebPage(page) => Some(page.url.as_str()),
            _ => None,
        }
    }
}

/// An element placed on the artboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Top-left corner in page coordinates.
    pub position: Point,
    /// Locked elements are skipped by drag and resize.
    #[serde(default)]
    pub locked: bool,
    /// Group tag, shared by all members of the same group.
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Kind-specific fields.
    pub body: ElementBody,
}

impl Element {
    /// Create an element with a fresh id.
    pub fn new(position: Point, body: ElementBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            locked: false,
            group_id: None,
            body,
        }
    }

    /// Identity, fixed at creation.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Kind of the body, which decides the paint layer.
    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    pub fn size(&self) -> Size {
        self.body.size()
    }

    /// Bounding box in page coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Move the element by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
