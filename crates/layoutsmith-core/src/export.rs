//! Export utilities: render the design to JSON or to a standalone HTML page.

use crate::shapes::{Element, ElementKind};
use std::fmt::Write;

/// Suggested file name for JSON exports.
pub const JSON_EXPORT_FILE_NAME: &str = "design-export.json";
/// Suggested file name for HTML exports.
pub const HTML_EXPORT_FILE_NAME: &str = "design-export.html";

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Html,
}

impl ExportFormat {
    /// Suggested file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => JSON_EXPORT_FILE_NAME,
            ExportFormat::Html => HTML_EXPORT_FILE_NAME,
        }
    }
}

/// Pretty-printed JSON array of the elements, in list order.
pub fn export_json(elements: &[Element]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(elements)
}

/// A standalone HTML page reproducing the design.
///
/// Elements become absolutely positioned `div`s inside a canvas-sized
/// container, emitted bottom layer first so later ones paint on top.
pub fn export_html(elements: &[Element], canvas_width: f64, canvas_height: f64) -> String {
    let mut ordered: Vec<&Element> = elements.iter().collect();
    ordered.sort_by_key(|e| e.z_index);

    let body = ordered
        .into_iter()
        .map(element_html)
        .collect::<Vec<_>>()
        .join("\n    ");

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Design Export</title>
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      background: #1a1a1a;
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    }}
    .canvas {{
      position: relative;
      width: {canvas_width}px;
      height: {canvas_height}px;
      background: #252525;
      box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.5);
    }}
  </style>
</head>
<body>
  <div class="canvas">
    {body}
  </div>
</body>
</html>"#
    );
    out
}

/// Inline style for one element.
fn element_style(element: &Element) -> String {
    let g = &element.geometry;
    let style = &element.style;

    let mut css = String::new();
    let _ = write!(
        css,
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
         transform: rotate({}deg); transform-origin: center center; \
         background-color: {}; color: {}; font-size: {}px; ",
        g.x, g.y, g.width, g.height, g.rotation, style.background_color, style.text_color, style.font_size
    );
    if element.kind() == ElementKind::Text {
        css.push_str("display: flex; align-items: center; justify-content: center; ");
    }
    css.push_str("box-sizing: border-box;");
    css
}

fn element_html(element: &Element) -> String {
    let style = escape_html(&element_style(element));
    match element.kind() {
        ElementKind::Text => format!("<div style=\"{}\">{}</div>", style, escape_html(&element.text)),
        ElementKind::Rectangle => format!("<div style=\"{}\"></div>", style),
    }
}

fn escape_html(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&#39;"),
            _ => s.push(ch),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::EditorState;
    use crate::shapes::Geometry;

    #[test]
    fn test_json_export_is_element_array() {
        let state = EditorState::sample();
        let json = export_json(&state.elements).unwrap();
        let parsed: Vec<Element> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state.elements);
        assert!(json.starts_with("[\n  {"));
    }

    #[test]
    fn test_html_rectangle_style() {
        let rect = Element::new(ElementKind::Rectangle, Geometry::new(100.0, 100.0, 200.0, 150.0).with_rotation(15.0));
        let html = export_html(&[rect], 1200.0, 800.0);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("width: 1200px;"));
        assert!(html.contains("height: 800px;"));
        assert!(html.contains(
            "<div style=\"position: absolute; left: 100px; top: 100px; width: 200px; height: 150px; \
             transform: rotate(15deg); transform-origin: center center; background-color: #4F46E5; \
             color: #FFFFFF; font-size: 16px; box-sizing: border-box;\"></div>"
        ));
    }

    #[test]
    fn test_html_text_is_centered_and_escaped() {
        let text = Element::new(ElementKind::Text, Geometry::new(0.0, 0.0, 300.0, 60.0))
            .with_text("Fish & <Chips>");
        let html = export_html(&[text], 1200.0, 800.0);

        assert!(html.contains("font-size: 20px; display: flex; align-items: center; justify-content: center; box-sizing: border-box;"));
        assert!(html.contains(">Fish &amp; &lt;Chips&gt;</div>"));
    }

    #[test]
    fn test_html_orders_by_z_index() {
        let top = Element::new(ElementKind::Text, Geometry::new(0.0, 0.0, 300.0, 60.0))
            .with_z_index(5)
            .with_text("top");
        let bottom = Element::new(ElementKind::Text, Geometry::new(0.0, 0.0, 300.0, 60.0))
            .with_z_index(1)
            .with_text("bottom");
        let html = export_html(&[top, bottom], 1200.0, 800.0);

        let bottom_at = html.find(">bottom<").unwrap();
        let top_at = html.find(">top<").unwrap();
        assert!(bottom_at < top_at);
    }

    #[test]
    fn test_html_empty_canvas() {
        let html = export_html(&[], 640.0, 480.0);
        assert!(html.contains("<div class=\"canvas\">"));
        assert!(html.contains("width: 640px;"));
        assert!(!html.contains("position: absolute"));
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(ExportFormat::Json.file_name(), "design-export.json");
        assert_eq!(ExportFormat::Html.file_name(), "design-export.html");
    }
}
