//! Editing sessions against real and failing storage backends.

use kurbo::Point;
use layoutsmith_core::{
    Editor, EditorConfig, EditorState, ElementKind, FileStorage, Key, KeyEvent, MemoryStorage, MouseButton,
    PointerEvent, STORAGE_KEY, Storage, StorageError, StorageResult,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// Backend whose writes always fail.
#[derive(Default)]
struct BrokenStorage {
    attempts: AtomicUsize,
}

impl Storage for BrokenStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Io("disk unplugged".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Io("disk unplugged".to_string()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Io("disk unplugged".to_string()))
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(vec![])
    }
}

fn unsnapped_config() -> EditorConfig {
    EditorConfig {
        snap_to_grid: false,
        ..EditorConfig::default()
    }
}

fn stored_state<S: Storage>(storage: &S) -> EditorState {
    let json = storage.get(STORAGE_KEY).unwrap().expect("snapshot written");
    EditorState::from_json(&json).unwrap()
}

#[test]
fn test_every_change_reaches_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let mut editor = Editor::open(storage.clone(), EditorConfig::default()).unwrap();

    let id = editor.add_element(ElementKind::Rectangle);
    editor.flush();
    assert_eq!(stored_state(storage.as_ref()).len(), 5);

    editor.move_element(&id, 16.0, 16.0);
    editor.flush();
    let stored = stored_state(storage.as_ref());
    let g = stored.element(&id).unwrap().geometry;
    assert_eq!((g.x, g.y), (16.0, 16.0));

    editor.delete_element(&id);
    editor.flush();
    assert!(stored_state(storage.as_ref()).element(&id).is_none());
}

#[test]
fn test_editing_continues_when_writes_fail() {
    let storage = Arc::new(BrokenStorage::default());
    let mut editor = Editor::open(storage.clone(), unsnapped_config()).unwrap();

    // Unreadable store falls back to the sample document.
    assert_eq!(editor.state().len(), 4);

    let id = editor.add_element(ElementKind::Text);
    assert!(editor.rotate_element(&id, 45.0));
    editor.flush();
    assert!(editor.move_element(&id, 10.0, 10.0));
    editor.flush();

    assert!(storage.attempts.load(Ordering::SeqCst) >= 2);
    let g = editor.state().element(&id).unwrap().geometry;
    assert_eq!((g.x, g.y, g.rotation), (10.0, 10.0, 45.0));
}

#[test]
fn test_unchanged_operations_do_not_write() {
    let storage = Arc::new(BrokenStorage::default());
    let mut editor = Editor::open(storage.clone(), unsnapped_config()).unwrap();

    assert!(!editor.move_layer_up("missing"));
    assert!(!editor.select_element(None));
    editor.flush();
    assert_eq!(storage.attempts.load(Ordering::SeqCst), 0);
}

#[test]
fn test_file_session_survives_restart() {
    let dir = tempdir().unwrap();
    let config = unsnapped_config();

    let (id, saved) = {
        let storage = Arc::new(FileStorage::new(dir.path()).unwrap());
        let mut editor = Editor::open(storage, config.clone()).unwrap();
        let id = editor.add_element(ElementKind::Rectangle);
        editor.resize_element(&id, 490.0, 330.0, 30.0, 30.0);
        (id, editor.state().clone())
    };

    let storage = Arc::new(FileStorage::new(dir.path()).unwrap());
    let editor = Editor::open(storage, config).unwrap();
    assert_eq!(editor.state(), &saved);

    let g = editor.state().element(&id).unwrap().geometry;
    assert_eq!((g.x, g.y, g.width, g.height), (490.0, 330.0, 40.0, 40.0));
    assert_eq!(editor.state().selected_element_id.as_deref(), Some(id.as_str()));
}

#[test]
fn test_malformed_snapshot_starts_from_sample() {
    let storage = Arc::new(MemoryStorage::with_value(STORAGE_KEY, r#"{"elements": 12}"#));
    let editor = Editor::open(storage, EditorConfig::default()).unwrap();

    let state = editor.state();
    assert_eq!(state.len(), 4);
    assert!(state.snap_to_grid);
    assert!(state.selected_element_id.is_none());
}

#[test]
fn test_pointer_session_is_persisted() {
    let storage = Arc::new(MemoryStorage::new());
    let config = unsnapped_config();
    let mut editor = Editor::with_state(storage.clone(), config.clone(), EditorState::from_config(&config)).unwrap();
    let id = editor.add_element(ElementKind::Rectangle);

    // Drag the bottom-right handle out by (40, 20).
    let events = [
        PointerEvent::Down {
            position: Point::new(700.0, 460.0),
            button: MouseButton::Left,
        },
        PointerEvent::Move {
            position: Point::new(740.0, 480.0),
        },
        PointerEvent::Up {
            position: Point::new(740.0, 480.0),
            button: MouseButton::Left,
        },
    ];
    for event in &events {
        editor.handle_pointer_event(event);
    }
    editor.handle_key_event(&KeyEvent::pressed(Key::ArrowDown));
    editor.flush();

    let stored = stored_state(storage.as_ref());
    let g = stored.element(&id).unwrap().geometry;
    assert_eq!((g.x, g.y, g.width, g.height), (500.0, 345.0, 240.0, 140.0));
    assert!(editor.controller().is_idle());
}
