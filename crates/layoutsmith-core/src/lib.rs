//! Layoutsmith Core Library
//!
//! Platform-agnostic data structures and editing logic for the Layoutsmith
//! canvas editor: elements, the gesture state machine, persistence and export.

pub mod canvas;
pub mod export;
pub mod gesture;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod storage;

pub use canvas::{Editor, EditorConfig, EditorState};
pub use export::{ExportFormat, export_html, export_json};
pub use gesture::{Gesture, InteractionController};
pub use input::{Key, KeyEvent, MouseButton, PointerEvent};
pub use selection::{Corner, Handle, HandleKind};
pub use shapes::{Element, ElementId, ElementKind, ElementPatch, ElementStyle, Geometry};
pub use snap::{GRID_SIZE, MIN_SIZE};
pub use storage::{FileStorage, MemoryStorage, STORAGE_KEY, Storage, StorageError, StorageResult};
