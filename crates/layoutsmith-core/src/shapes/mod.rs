//! Element definitions for the layout canvas.

mod rectangle;
mod text;

pub use rectangle::{DEFAULT_RECT_FILL, DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH};
pub use text::{DEFAULT_TEXT_CONTENT, DEFAULT_TEXT_FONT_SIZE, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH};

use crate::snap::{MIN_SIZE, finite_or};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = String;

/// CSS keyword for a fully transparent fill.
pub const TRANSPARENT: &str = "transparent";

/// Default text color for every kind.
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

/// Default font size for rectangles.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Generate a fresh element id.
pub fn generate_id() -> ElementId {
    format!("el_{}", Uuid::new_v4().simple())
}

/// The kind of element. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "rect")]
    Rectangle,
    #[serde(rename = "text")]
    Text,
}

impl ElementKind {
    /// Size a freshly added element gets.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            ElementKind::Rectangle => (DEFAULT_RECT_WIDTH, DEFAULT_RECT_HEIGHT),
            ElementKind::Text => (DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT),
        }
    }

    /// Style a freshly added element gets.
    pub fn default_style(self) -> ElementStyle {
        match self {
            ElementKind::Rectangle => rectangle::default_style(),
            ElementKind::Text => text::default_style(),
        }
    }

    /// Content a freshly added element gets.
    pub fn default_text(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "",
            ElementKind::Text => DEFAULT_TEXT_CONTENT,
        }
    }

    /// Human-readable name for layer lists.
    pub fn display_name(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Text => "Text",
        }
    }
}

/// Position, size and rotation of an element.
///
/// `x`/`y` is the top-left corner of the unrotated box. Rotation is in degrees
/// and is applied around the box center when drawn; it never changes the
/// stored box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    /// Create an unrotated geometry.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// The unrotated bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Visual center, the pivot for rotation.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Transform from the unrotated box frame to canvas coordinates.
    pub fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation.to_radians(), self.center())
    }

    /// Map a canvas point into the unrotated box frame.
    pub fn to_local(&self, point: Point) -> Point {
        self.rotation_transform().inverse() * point
    }

    /// Whether a canvas point lies inside the rotated box.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(self.to_local(point))
    }
}

/// Visual style of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStyle {
    /// CSS fill color.
    pub background_color: String,
    /// CSS text color.
    #[serde(rename = "color")]
    pub text_color: String,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        rectangle::default_style()
    }
}

/// A positioned, styled design object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    #[serde(rename = "type")]
    pub(crate) kind: ElementKind,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Stacking order; higher draws on top.
    #[serde(rename = "zIndex", default)]
    pub z_index: i64,
    #[serde(rename = "styles", default)]
    pub style: ElementStyle,
    /// Text content. Only drawn for [`ElementKind::Text`].
    #[serde(default)]
    pub text: String,
}

impl Element {
    /// Create an element with a fresh id and the defaults for its kind.
    pub fn new(kind: ElementKind, geometry: Geometry) -> Self {
        Self {
            id: generate_id(),
            kind,
            geometry,
            z_index: 0,
            style: kind.default_style(),
            text: kind.default_text().to_string(),
        }
    }

    /// Set the stacking order.
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    /// Label shown in the layers list: the content of a text element, or
    /// the kind name.
    pub fn label(&self) -> &str {
        if self.is_text() && !self.text.is_empty() {
            &self.text
        } else {
            self.kind.display_name()
        }
    }
}

/// A partial update from the properties panel.
///
/// `None` fields are left untouched. Geometry written through a patch is not
/// clamped; the next move or resize brings the element back inside the canvas.
/// Non-finite numbers are replaced so the snapshot stays serializable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub background_color: Option<String>,
    #[serde(rename = "color")]
    pub text_color: Option<String>,
    pub font_size: Option<f64>,
    pub text: Option<String>,
}

impl ElementPatch {
    /// Whether the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the patch into `element`. Returns true if anything changed.
    pub fn apply(&self, element: &mut Element) -> bool {
        let before = element.clone();

        let geometry = &mut element.geometry;
        if let Some(x) = self.x {
            geometry.x = finite_or(x, 0.0);
        }
        if let Some(y) = self.y {
            geometry.y = finite_or(y, 0.0);
        }
        if let Some(width) = self.width {
            geometry.width = finite_or(width, MIN_SIZE);
        }
        if let Some(height) = self.height {
            geometry.height = finite_or(height, MIN_SIZE);
        }
        if let Some(rotation) = self.rotation {
            geometry.rotation = finite_or(rotation, 0.0);
        }

        let style = &mut element.style;
        if let Some(color) = &self.background_color {
            style.background_color.clone_from(color);
        }
        if let Some(color) = &self.text_color {
            style.text_color.clone_from(color);
        }
        if let Some(size) = self.font_size {
            style.font_size = finite_or(size, element.kind.default_style().font_size);
        }

        if let Some(text) = &self.text {
            element.text.clone_from(text);
        }

        *element != before
    }
}
