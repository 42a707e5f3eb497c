//! Text element defaults.

use super::{DEFAULT_TEXT_COLOR, ElementStyle, TRANSPARENT};

/// Width of a newly added text box.
pub const DEFAULT_TEXT_WIDTH: f64 = 300.0;
/// Height of a newly added text box.
pub const DEFAULT_TEXT_HEIGHT: f64 = 60.0;
/// Font size of a newly added text box.
pub const DEFAULT_TEXT_FONT_SIZE: f64 = 20.0;
/// Placeholder content of a newly added text box.
pub const DEFAULT_TEXT_CONTENT: &str = "New Text";

/// Text boxes are transparent so the text sits directly on the canvas.
pub(super) fn default_style() -> ElementStyle {
    ElementStyle {
        background_color: TRANSPARENT.to_string(),
        text_color: DEFAULT_TEXT_COLOR.to_string(),
        font_size: DEFAULT_TEXT_FONT_SIZE,
    }
}
