//! Gesture state machine for pointer and keyboard interaction.
//!
//! The controller keeps only the anchor captured when a gesture starts. Every
//! pointer move is turned into an absolute proposal (start value plus delta)
//! and handed to the element store, which applies snapping and clamping.

use crate::canvas::EditorState;
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::selection::{Corner, HandleKind, apply_corner_resize, hit_test_handles};
use crate::shapes::Geometry;
use crate::snap::angle_between;
use kurbo::Point;

/// Distance an arrow key moves the selected element.
pub const NUDGE_STEP: f64 = 5.0;

/// Anchor for a drag: where the pointer and the element started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer: Point,
    pub element_origin: Point,
}

/// Anchor for a corner resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeAnchor {
    pub pointer: Point,
    pub element_start: Geometry,
}

/// Anchor for a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateAnchor {
    /// Element center at gesture start, the pivot for the whole gesture.
    pub center: Point,
    /// Angle from the center to the pointer at gesture start.
    pub start_angle: f64,
    pub element_start_rotation: f64,
}

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragAnchor),
    Resizing(Corner, ResizeAnchor),
    Rotating(RotateAnchor),
}

impl Gesture {
    /// Short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Dragging(_) => "drag",
            Gesture::Resizing(..) => "resize",
            Gesture::Rotating(_) => "rotate",
        }
    }
}

/// Turns raw input into element store calls.
///
/// Never persisted; a new session always starts [`Gesture::Idle`].
#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    nudge_step: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_nudge_step(NUDGE_STEP)
    }

    /// Controller whose arrow keys move by `nudge_step`.
    pub fn with_nudge_step(nudge_step: f64) -> Self {
        Self {
            gesture: Gesture::Idle,
            nudge_step,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    pub fn nudge_step(&self) -> f64 {
        self.nudge_step
    }

    fn start(&mut self, gesture: Gesture) {
        log::debug!("Gesture started: {}", gesture.name());
        self.gesture = gesture;
    }

    /// Start dragging element `id`. Returns false unless idle and `id` exists.
    pub fn begin_drag(&mut self, state: &EditorState, id: &str, pointer: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(element) = state.element(id) else {
            return false;
        };
        let geometry = element.geometry;
        self.start(Gesture::Dragging(DragAnchor {
            pointer,
            element_origin: Point::new(geometry.x, geometry.y),
        }));
        true
    }

    /// Start resizing element `id` from `corner`.
    pub fn begin_resize(&mut self, state: &EditorState, id: &str, corner: Corner, pointer: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(element) = state.element(id) else {
            return false;
        };
        self.start(Gesture::Resizing(
            corner,
            ResizeAnchor {
                pointer,
                element_start: element.geometry,
            },
        ));
        true
    }

    /// Start rotating element `id` around its current center.
    pub fn begin_rotate(&mut self, state: &EditorState, id: &str, pointer: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(element) = state.element(id) else {
            return false;
        };
        let center = element.geometry.center();
        self.start(Gesture::Rotating(RotateAnchor {
            center,
            start_angle: angle_between(center, pointer),
            element_start_rotation: element.geometry.rotation,
        }));
        true
    }

    /// Continue the active gesture on the selected element.
    ///
    /// Ignored when idle or when nothing is selected. Returns true if the
    /// element changed.
    pub fn pointer_move(&mut self, state: &mut EditorState, pointer: Point) -> bool {
        if self.is_idle() {
            return false;
        }
        let Some(id) = state.selected_element().map(|e| e.id().to_owned()) else {
            return false;
        };

        match self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging(anchor) => {
                let target = anchor.element_origin + (pointer - anchor.pointer);
                state.move_element(&id, target.x, target.y)
            }
            Gesture::Resizing(corner, anchor) => {
                let proposed = apply_corner_resize(&anchor.element_start, corner, pointer - anchor.pointer);
                state.resize_element(&id, proposed.x, proposed.y, proposed.width, proposed.height)
            }
            Gesture::Rotating(anchor) => {
                let current = angle_between(anchor.center, pointer);
                state.rotate_element(&id, anchor.element_start_rotation + (current - anchor.start_angle))
            }
        }
    }

    /// End whatever gesture is active. Returns true if one was.
    pub fn pointer_up(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        log::debug!("Gesture ended: {}", self.gesture.name());
        self.gesture = Gesture::Idle;
        true
    }

    /// Primary button press at `position`.
    ///
    /// A handle of the selected element wins over the elements beneath it.
    /// Otherwise the top-most element under the pointer is selected and
    /// dragged, and a press on empty canvas clears the selection. Returns true
    /// if the selection changed.
    pub fn pointer_down(&mut self, state: &mut EditorState, position: Point) -> bool {
        if !self.is_idle() {
            return false;
        }

        if let Some(selected) = state.selected_element() {
            if let Some(kind) = hit_test_handles(&selected.geometry, position) {
                let id = selected.id().to_owned();
                match kind {
                    HandleKind::Corner(corner) => self.begin_resize(state, &id, corner, position),
                    HandleKind::Rotate => self.begin_rotate(state, &id, position),
                };
                return false;
            }
        }

        match state.elements_at_point(position).into_iter().next() {
            Some(id) => {
                let changed = state.select_element(Some(id.as_str()));
                self.begin_drag(state, &id, position);
                changed
            }
            None => state.select_element(None),
        }
    }

    /// Dispatch a raw pointer event. Returns true if the state changed.
    pub fn handle_pointer_event(&mut self, state: &mut EditorState, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(state, position),
            PointerEvent::Down { .. } => false,
            PointerEvent::Move { position } => self.pointer_move(state, position),
            PointerEvent::Up { .. } => {
                self.pointer_up();
                false
            }
        }
    }

    /// Keyboard shortcuts for the selected element: arrows nudge, Delete and
    /// Backspace remove. Ignored while a text field has focus.
    pub fn handle_key_event(&mut self, state: &mut EditorState, event: &KeyEvent) -> bool {
        let KeyEvent::Pressed {
            key,
            text_input_focused,
        } = event
        else {
            return false;
        };
        if *text_input_focused {
            return false;
        }
        let Some(element) = state.selected_element() else {
            return false;
        };
        let id = element.id().to_owned();
        let Geometry { x, y, .. } = element.geometry;

        if key.is_delete() {
            return state.delete_element(&id);
        }
        match key.arrow_direction() {
            Some((dx, dy)) => state.move_element(&id, x + dx * self.nudge_step, y + dy * self.nudge_step),
            None => false,
        }
    }
}
