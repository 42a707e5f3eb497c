//! Rectangle defaults.

use super::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, ElementStyle};

/// Width of a newly added rectangle.
pub const DEFAULT_RECT_WIDTH: f64 = 200.0;
/// Height of a newly added rectangle.
pub const DEFAULT_RECT_HEIGHT: f64 = 120.0;
/// Opaque fill of a newly added rectangle.
pub const DEFAULT_RECT_FILL: &str = "#4F46E5";

pub(super) fn default_style() -> ElementStyle {
    ElementStyle {
        background_color: DEFAULT_RECT_FILL.to_string(),
        text_color: DEFAULT_TEXT_COLOR.to_string(),
        font_size: DEFAULT_FONT_SIZE,
    }
}
