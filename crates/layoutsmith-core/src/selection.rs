//! Selection handles: where they sit, what they hit, and how a corner drag
//! reshapes an element.

use crate::shapes::Geometry;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Side length of a square corner handle.
pub const HANDLE_SIZE: f64 = 10.0;
/// Diameter of the circular rotate handle.
pub const ROTATE_HANDLE_SIZE: f64 = 16.0;
/// Distance from the top edge to the rotate handle center.
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All four corners, in handle order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Parse a compass tag (`nw`, `ne`, `sw`, `se`).
    pub fn from_compass(tag: &str) -> Option<Self> {
        match tag {
            "nw" => Some(Corner::TopLeft),
            "ne" => Some(Corner::TopRight),
            "sw" => Some(Corner::BottomLeft),
            "se" => Some(Corner::BottomRight),
            _ => None,
        }
    }

    /// Compass tag for this corner.
    pub fn compass(self) -> &'static str {
        match self {
            Corner::TopLeft => "nw",
            Corner::TopRight => "ne",
            Corner::BottomLeft => "sw",
            Corner::BottomRight => "se",
        }
    }

    /// Position of this corner on an unrotated box.
    pub fn position(self, geometry: &Geometry) -> Point {
        let bounds = geometry.bounds();
        match self {
            Corner::TopLeft => Point::new(bounds.x0, bounds.y0),
            Corner::TopRight => Point::new(bounds.x1, bounds.y0),
            Corner::BottomLeft => Point::new(bounds.x0, bounds.y1),
            Corner::BottomRight => Point::new(bounds.x1, bounds.y1),
        }
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// Corner handle, drives a resize.
    Corner(Corner),
    /// Rotation handle above the top edge.
    Rotate,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in canvas coordinates, already rotated with the element.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }
}

/// Unrotated handle center for a handle kind.
fn local_handle_position(geometry: &Geometry, kind: HandleKind) -> Point {
    match kind {
        HandleKind::Corner(corner) => corner.position(geometry),
        HandleKind::Rotate => Point::new(
            geometry.x + geometry.width / 2.0,
            geometry.y - ROTATE_HANDLE_OFFSET,
        ),
    }
}

fn handle_kinds() -> impl Iterator<Item = HandleKind> {
    Corner::ALL
        .into_iter()
        .map(HandleKind::Corner)
        .chain(std::iter::once(HandleKind::Rotate))
}

/// Handles for a selected element: four corners and a rotate handle.
pub fn get_handles(geometry: &Geometry) -> Vec<Handle> {
    let transform = geometry.rotation_transform();
    handle_kinds()
        .map(|kind| Handle::new(transform * local_handle_position(geometry, kind), kind))
        .collect()
}

/// Find which handle (if any) is under a canvas point.
///
/// The point is first mapped into the element's unrotated frame, so the test
/// follows the element's rotation.
pub fn hit_test_handles(geometry: &Geometry, point: Point) -> Option<HandleKind> {
    let local = geometry.to_local(point);
    handle_kinds().find(|&kind| {
        let center = local_handle_position(geometry, kind);
        match kind {
            HandleKind::Corner(_) => {
                let half = HANDLE_SIZE / 2.0;
                (local.x - center.x).abs() <= half && (local.y - center.y).abs() <= half
            }
            HandleKind::Rotate => local.distance(center) <= ROTATE_HANDLE_SIZE / 2.0,
        }
    })
}

/// Proposed geometry for a corner drag.
///
/// The opposite corner stays put; the dragged corner moves by `delta`. The
/// result is not floored or clamped, that is left to the element store.
pub fn apply_corner_resize(start: &Geometry, corner: Corner, delta: Vec2) -> Geometry {
    let mut proposed = *start;
    match corner {
        Corner::BottomRight => {
            proposed.width = start.width + delta.x;
            proposed.height = start.height + delta.y;
        }
        Corner::BottomLeft => {
            proposed.x = start.x + delta.x;
            proposed.width = start.width - delta.x;
            proposed.height = start.height + delta.y;
        }
        Corner::TopRight => {
            proposed.y = start.y + delta.y;
            proposed.width = start.width + delta.x;
            proposed.height = start.height - delta.y;
        }
        Corner::TopLeft => {
            proposed.x = start.x + delta.x;
            proposed.y = start.y + delta.y;
            proposed.width = start.width - delta.x;
            proposed.height = start.height - delta.y;
        }
    }
    proposed
}
