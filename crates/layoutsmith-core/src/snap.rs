//! Snap, clamp and angle helpers for element geometry.
//!
//! Everything here is a pure function of its inputs. The element store calls
//! these after a gesture has produced a proposed position or size.

use kurbo::Point;

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 8.0;

/// Smallest width or height an element can be resized to.
pub const MIN_SIZE: f64 = 40.0;

/// Full turn in degrees.
const FULL_TURN: f64 = 360.0;

/// Snap a value to the nearest multiple of `grid_size`.
///
/// Returns `value` unchanged when snapping is disabled or the grid size is not
/// a positive number. Halfway values round up, so `4.0` snaps to `8.0` and
/// `-4.0` snaps to `0.0`.
pub fn snap(value: f64, grid_size: f64, enabled: bool) -> f64 {
    if !enabled || !is_valid_grid(grid_size) {
        return value;
    }
    (value / grid_size + 0.5).floor() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap(point.x, grid_size, true), snap(point.y, grid_size, true))
}

/// Largest multiple of `grid_size` that is not greater than `value`.
pub fn floor_to_grid(value: f64, grid_size: f64) -> f64 {
    if !is_valid_grid(grid_size) {
        return value;
    }
    (value / grid_size).floor() * grid_size
}

/// Smallest multiple of `grid_size` that is not less than `value`.
pub fn ceil_to_grid(value: f64, grid_size: f64) -> f64 {
    if !is_valid_grid(grid_size) {
        return value;
    }
    (value / grid_size).ceil() * grid_size
}

fn is_valid_grid(grid_size: f64) -> bool {
    grid_size.is_finite() && grid_size > 0.0
}

/// Replace NaN and infinities with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Clamp a box position so the box stays inside the canvas.
///
/// When the box is larger than the canvas the lower bound wins and the
/// position is pinned to zero.
pub fn clamp_position(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> (f64, f64) {
    (
        x.min(canvas_width - width).max(0.0),
        y.min(canvas_height - height).max(0.0),
    )
}

/// Like [`clamp_position`], but the far-edge limits are rounded down to the
/// grid so an already snapped position stays on the grid after clamping.
pub fn clamp_position_to_grid(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    canvas_width: f64,
    canvas_height: f64,
    grid_size: f64,
) -> (f64, f64) {
    (
        x.min(floor_to_grid(canvas_width - width, grid_size)).max(0.0),
        y.min(floor_to_grid(canvas_height - height, grid_size)).max(0.0),
    )
}

/// Fit a proposed element size along one axis.
///
/// The minimum size is applied first, then the size is capped to the canvas
/// extent `limit`, then snapped. A snapped size never drops below
/// [`MIN_SIZE`] or grows past `limit`.
pub fn fit_size(raw: f64, limit: f64, grid_size: f64, enabled: bool) -> f64 {
    let limit = limit.max(MIN_SIZE);
    let size = finite_or(raw, MIN_SIZE).clamp(MIN_SIZE, limit);
    if !enabled || !is_valid_grid(grid_size) {
        return size;
    }

    let snapped = snap(size, grid_size, true);
    if snapped < MIN_SIZE {
        ceil_to_grid(MIN_SIZE, grid_size)
    } else if snapped > limit {
        floor_to_grid(limit, grid_size)
    } else {
        snapped
    }
}

/// Angle in degrees from `center` to `point`, normalized to `[0, 360)`.
///
/// Gestures measure both the start and the current angle with this function,
/// so only the difference between the two is meaningful.
pub fn angle_between(center: Point, point: Point) -> f64 {
    let angle = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    if angle < 0.0 { angle + FULL_TURN } else { angle }
}

/// Reduce a rotation to `(-360, 360)`, keeping the sign of the input.
///
/// `370` becomes `10` and `-10` stays `-10`. Non-finite input becomes `0`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    finite_or(degrees, 0.0) % FULL_TURN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_disabled_is_identity() {
        assert_eq!(snap(13.7, GRID_SIZE, false), 13.7);
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(11.0, GRID_SIZE, true), 8.0);
        assert_eq!(snap(12.0, GRID_SIZE, true), 16.0);
        assert_eq!(snap(13.0, GRID_SIZE, true), 16.0);
        assert_eq!(snap(-4.0, GRID_SIZE, true), 0.0);
        assert_eq!(snap(-5.0, GRID_SIZE, true), -8.0);
    }

    #[test]
    fn test_snap_invalid_grid() {
        assert_eq!(snap(13.0, 0.0, true), 13.0);
        assert_eq!(snap(13.0, f64::NAN, true), 13.0);
    }

    #[test]
    fn test_snap_to_grid_point() {
        let p = snap_to_grid(Point::new(19.0, 3.0), GRID_SIZE);
        assert_eq!(p, Point::new(16.0, 0.0));
    }

    #[test]
    fn test_clamp_position_inside() {
        assert_eq!(clamp_position(10.0, 20.0, 100.0, 100.0, 1200.0, 800.0), (10.0, 20.0));
    }

    #[test]
    fn test_clamp_position_edges() {
        assert_eq!(clamp_position(-30.0, -1.0, 100.0, 100.0, 1200.0, 800.0), (0.0, 0.0));
        assert_eq!(clamp_position(1150.0, 790.0, 100.0, 100.0, 1200.0, 800.0), (1100.0, 700.0));
    }

    #[test]
    fn test_clamp_position_oversized_box() {
        assert_eq!(clamp_position(50.0, 50.0, 1500.0, 900.0, 1200.0, 800.0), (0.0, 0.0));
    }

    #[test]
    fn test_clamp_position_to_grid_keeps_alignment() {
        // 1200 - 150 = 1050, which is not a multiple of 8.
        let (x, y) = clamp_position_to_grid(1096.0, 0.0, 150.0, 40.0, 1200.0, 800.0, GRID_SIZE);
        assert_eq!(x, 1048.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_fit_size_floor_then_snap() {
        assert_eq!(fit_size(30.0, 1200.0, GRID_SIZE, false), MIN_SIZE);
        assert_eq!(fit_size(30.0, 1200.0, GRID_SIZE, true), MIN_SIZE);
        assert_eq!(fit_size(45.0, 1200.0, GRID_SIZE, true), 48.0);
        assert_eq!(fit_size(43.0, 1200.0, GRID_SIZE, true), 40.0);
    }

    #[test]
    fn test_fit_size_caps_to_canvas() {
        assert_eq!(fit_size(5000.0, 1200.0, GRID_SIZE, false), 1200.0);
        assert_eq!(fit_size(1203.0, 1203.0, GRID_SIZE, true), 1200.0);
    }

    #[test]
    fn test_fit_size_coarse_grid_never_below_minimum() {
        // 40 would round down to 30 on a 30-unit grid.
        assert_eq!(fit_size(40.0, 1200.0, 30.0, true), 60.0);
    }

    #[test]
    fn test_fit_size_non_finite() {
        assert_eq!(fit_size(f64::NAN, 1200.0, GRID_SIZE, false), MIN_SIZE);
        assert_eq!(fit_size(f64::INFINITY, 800.0, GRID_SIZE, true), MIN_SIZE);
    }

    #[test]
    fn test_angle_between() {
        let c = Point::new(0.0, 0.0);
        assert!((angle_between(c, Point::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((angle_between(c, Point::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((angle_between(c, Point::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((angle_between(c, Point::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_rotation_keeps_sign() {
        assert_eq!(normalize_rotation(190.0), 190.0);
        assert_eq!(normalize_rotation(370.0), 10.0);
        assert_eq!(normalize_rotation(-10.0), -10.0);
        assert_eq!(normalize_rotation(-370.0), -10.0);
        assert_eq!(normalize_rotation(720.0), 0.0);
        assert_eq!(normalize_rotation(f64::NAN), 0.0);
    }
}
