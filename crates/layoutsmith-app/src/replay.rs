//! Replaying recorded input against an editor session.
//!
//! A replay log is JSON lines; each line is one [`ReplayEvent`]. Lines that do
//! not parse are logged and skipped so one bad record does not lose the rest.

use layoutsmith_core::{Editor, ElementId, ElementKind, ElementPatch, KeyEvent, PointerEvent};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Command(EditorCommand),
}

/// A direct editor operation, as issued by the toolbar or properties panel.
///
/// Commands that take an `id` fall back to the current selection when it is
/// omitted, since element ids are only known once the elements exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    AddElement {
        kind: ElementKind,
    },
    SelectElement {
        #[serde(default)]
        id: Option<ElementId>,
    },
    UpdateElement {
        #[serde(default)]
        id: Option<ElementId>,
        patch: ElementPatch,
    },
    MoveElement {
        #[serde(default)]
        id: Option<ElementId>,
        x: f64,
        y: f64,
    },
    ResizeElement {
        #[serde(default)]
        id: Option<ElementId>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    RotateElement {
        #[serde(default)]
        id: Option<ElementId>,
        rotation: f64,
    },
    DeleteElement {
        #[serde(default)]
        id: Option<ElementId>,
    },
    MoveLayerUp {
        #[serde(default)]
        id: Option<ElementId>,
    },
    MoveLayerDown {
        #[serde(default)]
        id: Option<ElementId>,
    },
    ToggleSnap,
}

/// Counts from a replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events parsed and applied.
    pub applied: usize,
    /// Applied events that changed the document.
    pub changed: usize,
    /// Lines that failed to parse.
    pub skipped: usize,
}

/// Resolve an explicit id or fall back to the selection.
fn target(editor: &Editor, id: Option<ElementId>) -> Option<ElementId> {
    id.or_else(|| editor.state().selected_element_id.clone())
}

/// Apply one command. Returns true if the document changed.
pub fn apply_command(editor: &mut Editor, command: EditorCommand) -> bool {
    match command {
        EditorCommand::AddElement { kind } => {
            editor.add_element(kind);
            true
        }
        EditorCommand::SelectElement { id } => editor.select_element(id.as_deref()),
        EditorCommand::ToggleSnap => editor.toggle_snap(),
        EditorCommand::UpdateElement { id, patch } => {
            target(editor, id).is_some_and(|id| editor.update_element(&id, &patch))
        }
        EditorCommand::MoveElement { id, x, y } => {
            target(editor, id).is_some_and(|id| editor.move_element(&id, x, y))
        }
        EditorCommand::ResizeElement {
            id,
            x,
            y,
            width,
            height,
        } => target(editor, id).is_some_and(|id| editor.resize_element(&id, x, y, width, height)),
        EditorCommand::RotateElement { id, rotation } => {
            target(editor, id).is_some_and(|id| editor.rotate_element(&id, rotation))
        }
        EditorCommand::DeleteElement { id } => target(editor, id).is_some_and(|id| editor.delete_element(&id)),
        EditorCommand::MoveLayerUp { id } => target(editor, id).is_some_and(|id| editor.move_layer_up(&id)),
        EditorCommand::MoveLayerDown { id } => target(editor, id).is_some_and(|id| editor.move_layer_down(&id)),
    }
}

/// Apply one event. Returns true if the document changed.
pub fn apply_event(editor: &mut Editor, event: ReplayEvent) -> bool {
    match event {
        ReplayEvent::Pointer(pointer) => editor.handle_pointer_event(&pointer),
        ReplayEvent::Key(key) => editor.handle_key_event(&key),
        ReplayEvent::Command(command) => apply_command(editor, command),
    }
}

/// Apply every event in a JSON-lines log, in order.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn replay<R: BufRead>(editor: &mut Editor, reader: R) -> io::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<ReplayEvent>(line) {
            Ok(event) => {
                summary.applied += 1;
                if apply_event(editor, event) {
                    summary.changed += 1;
                }
            }
            Err(e) => {
                log::warn!("Skipping replay line {}: {}", index + 1, e);
                summary.skipped += 1;
            }
        }
    }

    log::info!(
        "Replay finished: {} applied, {} changed, {} skipped",
        summary.applied,
        summary.changed,
        summary.skipped
    );
    Ok(summary)
}
