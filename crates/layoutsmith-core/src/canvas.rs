//! Editor state and the editing session.
//!
//! [`EditorState`] is the persisted document: the element list, the selection
//! and the canvas settings. [`Editor`] wraps it with the runtime parts that are
//! never saved, the gesture controller and the background writer.

use crate::gesture::InteractionController;
use crate::input::{KeyEvent, PointerEvent};
use crate::shapes::{
    DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, Element, ElementId, ElementKind, ElementPatch, ElementStyle, Geometry,
    TRANSPARENT,
};
use crate::snap::{GRID_SIZE, clamp_position, clamp_position_to_grid, finite_or, fit_size, normalize_rotation, snap};
use crate::storage::{AutoSaver, STORAGE_KEY, Storage, StorageResult, load_state};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Settings for a new editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub grid_size: f64,
    /// Whether snapping starts enabled.
    pub snap_to_grid: bool,
    /// Storage key for the snapshot.
    pub storage_key: String,
    /// Distance an arrow key moves the selection.
    pub nudge_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            grid_size: GRID_SIZE,
            snap_to_grid: true,
            storage_key: STORAGE_KEY.to_string(),
            nudge_step: crate::gesture::NUDGE_STEP,
        }
    }
}

/// The persisted editor document.
///
/// Every mutating operation returns whether anything changed (or the new id)
/// so the caller knows when a snapshot is due. Unknown ids are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    pub elements: Vec<Element>,
    /// Currently selected element. Not validated against `elements`.
    pub selected_element_id: Option<ElementId>,
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl EditorState {
    /// An empty document with the canvas settings from `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            elements: Vec::new(),
            selected_element_id: None,
            snap_to_grid: config.snap_to_grid,
            grid_size: config.grid_size,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
        }
    }

    /// The sample document shown on first launch, with default settings.
    pub fn sample() -> Self {
        Self::sample_for(&EditorConfig::default())
    }

    /// The sample document with the canvas settings from `config`.
    pub fn sample_for(config: &EditorConfig) -> Self {
        let mut state = Self::from_config(config);
        let colored = |fill: &str, font_size: f64| ElementStyle {
            background_color: fill.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_size,
        };

        state.elements = vec![
            Element::new(ElementKind::Rectangle, Geometry::new(100.0, 100.0, 200.0, 150.0))
                .with_z_index(1)
                .with_style(colored("#3B82F6", DEFAULT_FONT_SIZE)),
            Element::new(ElementKind::Rectangle, Geometry::new(350.0, 150.0, 180.0, 120.0).with_rotation(15.0))
                .with_z_index(2)
                .with_style(colored("#10B981", DEFAULT_FONT_SIZE)),
            Element::new(ElementKind::Text, Geometry::new(150.0, 320.0, 300.0, 60.0))
                .with_z_index(3)
                .with_style(colored(TRANSPARENT, 24.0))
                .with_text("Visual Design Editor"),
            Element::new(ElementKind::Rectangle, Geometry::new(550.0, 300.0, 150.0, 150.0).with_rotation(45.0))
                .with_z_index(4)
                .with_style(colored("#8B5CF6", DEFAULT_FONT_SIZE)),
        ];
        state
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Look up an element by id.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// The selected element, if the selection names an existing element.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected_element_id.as_deref().and_then(|id| self.element(id))
    }

    /// Snap and clamp a proposed position for a box of the given size.
    fn place(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        let x = snap(finite_or(x, 0.0), self.grid_size, self.snap_to_grid);
        let y = snap(finite_or(y, 0.0), self.grid_size, self.snap_to_grid);
        if self.snap_to_grid {
            clamp_position_to_grid(x, y, width, height, self.canvas_width, self.canvas_height, self.grid_size)
        } else {
            clamp_position(x, y, width, height, self.canvas_width, self.canvas_height)
        }
    }

    fn replace_geometry(&mut self, index: usize, geometry: Geometry) -> bool {
        let current = &mut self.elements[index].geometry;
        if *current == geometry {
            return false;
        }
        *current = geometry;
        true
    }

    /// Add an element of `kind`, centered on the canvas, on top of every
    /// other element, and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let (width, height) = kind.default_size();
        let x = snap(self.canvas_width / 2.0 - width / 2.0, self.grid_size, self.snap_to_grid);
        let y = snap(self.canvas_height / 2.0 - height / 2.0, self.grid_size, self.snap_to_grid);
        let z_index = self.elements.iter().map(|e| e.z_index).fold(0, i64::max).saturating_add(1);

        let element = Element::new(kind, Geometry::new(x, y, width, height)).with_z_index(z_index);
        let id = element.id.clone();
        log::debug!("Added {} {} at ({}, {}) z={}", kind.display_name(), id, x, y, z_index);

        self.elements.push(element);
        self.selected_element_id = Some(id.clone());
        id
    }

    /// Set the selection. Unknown ids are stored as given.
    pub fn select_element(&mut self, id: Option<&str>) -> bool {
        if self.selected_element_id.as_deref() == id {
            return false;
        }
        self.selected_element_id = id.map(str::to_owned);
        true
    }

    /// Merge `patch` into an element. Geometry is taken as given.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        match self.index_of(id) {
            Some(index) => patch.apply(&mut self.elements[index]),
            None => false,
        }
    }

    /// Move an element to a proposed position, snapped and kept inside the
    /// canvas. A size left out of range by a patch is brought back into range
    /// first.
    pub fn move_element(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut geometry = self.elements[index].geometry;
        // Range only. Off-grid sizes are kept as they are.
        geometry.width = fit_size(geometry.width, self.canvas_width, self.grid_size, false);
        geometry.height = fit_size(geometry.height, self.canvas_height, self.grid_size, false);
        (geometry.x, geometry.y) = self.place(x, y, geometry.width, geometry.height);
        self.replace_geometry(index, geometry)
    }

    /// Resize an element to a proposed box.
    ///
    /// The size is floored to the minimum, capped to the canvas and snapped
    /// before the position is snapped and clamped against the new size.
    pub fn resize_element(&mut self, id: &str, x: f64, y: f64, width: f64, height: f64) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut geometry = self.elements[index].geometry;
        geometry.width = fit_size(width, self.canvas_width, self.grid_size, self.snap_to_grid);
        geometry.height = fit_size(height, self.canvas_height, self.grid_size, self.snap_to_grid);
        (geometry.x, geometry.y) = self.place(x, y, geometry.width, geometry.height);
        self.replace_geometry(index, geometry)
    }

    /// Set an element's rotation, reduced into `(-360, 360)`.
    pub fn rotate_element(&mut self, id: &str, degrees: f64) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut geometry = self.elements[index].geometry;
        geometry.rotation = normalize_rotation(degrees);
        self.replace_geometry(index, geometry)
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn delete_element(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.elements.remove(index);
        if self.selected_element_id.as_deref() == Some(id) {
            self.selected_element_id = None;
        }
        true
    }

    /// Indices of the elements in ascending z-order. Ties keep list order.
    fn z_sorted_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.elements.len()).collect();
        order.sort_by_key(|&i| self.elements[i].z_index);
        order
    }

    /// Swap z-index with the neighbor `offset` places away in z-order.
    fn swap_layer(&mut self, id: &str, offset: isize) -> bool {
        let order = self.z_sorted_indices();
        let Some(pos) = order.iter().position(|&i| self.elements[i].id == id) else {
            return false;
        };
        let Some(&neighbor) = pos.checked_add_signed(offset).and_then(|p| order.get(p)) else {
            return false;
        };
        let current = order[pos];

        let (a, b) = (self.elements[current].z_index, self.elements[neighbor].z_index);
        self.elements[current].z_index = b;
        self.elements[neighbor].z_index = a;
        a != b
    }

    /// Move an element one layer up. No-op for the top-most element.
    pub fn move_layer_up(&mut self, id: &str) -> bool {
        self.swap_layer(id, 1)
    }

    /// Move an element one layer down. No-op for the bottom-most element.
    pub fn move_layer_down(&mut self, id: &str) -> bool {
        self.swap_layer(id, -1)
    }

    /// Flip grid snapping. Existing elements are not re-snapped.
    pub fn toggle_snap(&mut self) -> bool {
        self.snap_to_grid = !self.snap_to_grid;
        true
    }

    /// Elements in drawing order, bottom first.
    pub fn paint_order(&self) -> Vec<&Element> {
        self.z_sorted_indices().into_iter().map(|i| &self.elements[i]).collect()
    }

    /// Elements as listed in the layers panel, top-most first.
    pub fn layers(&self) -> Vec<&Element> {
        let mut layers: Vec<&Element> = self.elements.iter().collect();
        layers.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        layers
    }

    /// Ids of the elements under a canvas point, top-most first.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementId> {
        self.paint_order()
            .into_iter()
            .rev()
            .filter(|e| e.geometry.contains(point))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Serialize the state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a state from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// An editing session: the document, the gesture controller and the
/// background writer that persists every change.
pub struct Editor {
    state: EditorState,
    controller: InteractionController,
    saver: AutoSaver,
    config: EditorConfig,
}

impl Editor {
    /// Open a session, restoring the snapshot stored under the configured key.
    pub fn open<S: Storage + 'static>(storage: Arc<S>, config: EditorConfig) -> StorageResult<Self> {
        let state = load_state(storage.as_ref(), &config.storage_key, &config);
        Self::with_state(storage, config, state)
    }

    /// Open a session on an explicit state.
    pub fn with_state<S: Storage + 'static>(
        storage: Arc<S>,
        config: EditorConfig,
        state: EditorState,
    ) -> StorageResult<Self> {
        let saver = AutoSaver::spawn(storage, config.storage_key.clone())?;
        log::info!(
            "Editor session opened on '{}' with {} elements",
            config.storage_key,
            state.len()
        );
        Ok(Self {
            state,
            controller: InteractionController::with_nudge_step(config.nudge_step),
            saver,
            config,
        })
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Queue a snapshot if `changed`.
    fn commit(&mut self, changed: bool) -> bool {
        if changed {
            self.saver.persist(&self.state);
        }
        changed
    }

    /// Wait until every queued snapshot has been written.
    pub fn flush(&self) {
        self.saver.flush();
    }

    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let id = self.state.add_element(kind);
        self.commit(true);
        id
    }

    pub fn select_element(&mut self, id: Option<&str>) -> bool {
        let changed = self.state.select_element(id);
        self.commit(changed)
    }

    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        let changed = self.state.update_element(id, patch);
        self.commit(changed)
    }

    pub fn move_element(&mut self, id: &str, x: f64, y: f64) -> bool {
        let changed = self.state.move_element(id, x, y);
        self.commit(changed)
    }

    pub fn resize_element(&mut self, id: &str, x: f64, y: f64, width: f64, height: f64) -> bool {
        let changed = self.state.resize_element(id, x, y, width, height);
        self.commit(changed)
    }

    pub fn rotate_element(&mut self, id: &str, degrees: f64) -> bool {
        let changed = self.state.rotate_element(id, degrees);
        self.commit(changed)
    }

    pub fn delete_element(&mut self, id: &str) -> bool {
        let changed = self.state.delete_element(id);
        self.commit(changed)
    }

    pub fn move_layer_up(&mut self, id: &str) -> bool {
        let changed = self.state.move_layer_up(id);
        self.commit(changed)
    }

    pub fn move_layer_down(&mut self, id: &str) -> bool {
        let changed = self.state.move_layer_down(id);
        self.commit(changed)
    }

    pub fn toggle_snap(&mut self) -> bool {
        let changed = self.state.toggle_snap();
        self.commit(changed)
    }

    /// Feed a pointer event through the gesture controller.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        let changed = self.controller.handle_pointer_event(&mut self.state, event);
        self.commit(changed)
    }

    /// Feed a key event through the gesture controller.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        let changed = self.controller.handle_key_event(&mut self.state, event);
        self.commit(changed)
    }
}
