//! Keyboard and pointer shortcut registry and documentation.

use layoutsmith_core::gesture::NUDGE_STEP;

/// A shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: String,
}

impl Shortcut {
    pub fn new(key: &'static str, description: impl Into<String>) -> Self {
        Self {
            key,
            description: description.into(),
        }
    }
}

/// Registry of all shortcuts the canvas reacts to.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let nudge = format!("{}px", NUDGE_STEP);
        vec![
            Shortcut::new("ArrowUp", format!("Move selected element up {}", nudge)),
            Shortcut::new("ArrowDown", format!("Move selected element down {}", nudge)),
            Shortcut::new("ArrowLeft", format!("Move selected element left {}", nudge)),
            Shortcut::new("ArrowRight", format!("Move selected element right {}", nudge)),
            Shortcut::new("Delete", "Delete selected element"),
            Shortcut::new("Backspace", "Delete selected element"),
            Shortcut::new("Drag", "Move element"),
            Shortcut::new("Drag corner", "Resize element"),
            Shortcut::new("Drag top handle", "Rotate element"),
            Shortcut::new("Click canvas", "Clear selection"),
        ]
    }

    /// Shortcut table as printable text.
    pub fn render() -> String {
        let mut out = String::from("\n=== Keyboard Shortcuts ===\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:20} {}\n", shortcut.key, shortcut.description));
        }
        out
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("{}", Self::render());
    }
}
