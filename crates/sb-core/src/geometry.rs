//! Shape math for drag gestures.
//!
//! Every shape is derived from two points: the `anchor` where the pointer
//! went down and the `current` pointer position.

use kurbo::{Point, Rect};

/// Rectangle as produced by a drag: positioned at the current pointer and
/// extending back toward the anchor. `width`/`height` are signed
/// (`anchor - current`) and go negative when dragging right or down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl DragRect {
    /// The covered area with non-negative width and height.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
        .abs()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

pub fn drag_rect(anchor: Point, current: Point) -> DragRect {
    DragRect {
        origin: current,
        width: anchor.x - current.x,
        height: anchor.y - current.y,
    }
}

/// Circle radius: the distance dragged from the center.
pub fn circle_radius(anchor: Point, current: Point) -> f64 {
    anchor.distance(current)
}

/// Isosceles triangle with its apex at the anchor. The third vertex
/// mirrors `current` across the vertical line through the anchor.
pub fn triangle_vertices(anchor: Point, current: Point) -> [Point; 3] {
    [
        anchor,
        current,
        Point::new(2.0 * anchor.x - current.x, current.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rect_is_anchored_at_current_point() {
        let r = drag_rect(Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        assert_eq!(r.origin, Point::new(50.0, 40.0));
        assert_eq!(r.width, -40.0);
        assert_eq!(r.height, -30.0);
        assert_eq!(r.bounds(), Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn rect_dragged_up_left_has_positive_size() {
        let r = drag_rect(Point::new(50.0, 40.0), Point::new(10.0, 10.0));
        assert_eq!(r.width, 40.0);
        assert_eq!(r.height, 30.0);
        assert_eq!(r.bounds(), Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn click_without_drag_is_empty() {
        let p = Point::new(7.0, 7.0);
        assert!(drag_rect(p, p).is_empty());
        assert!(!drag_rect(p, Point::new(7.0, 9.0)).is_empty());
    }

    #[test]
    fn circle_radius_is_euclidean() {
        assert_eq!(circle_radius(Point::ZERO, Point::new(3.0, 4.0)), 5.0);
        assert_eq!(
            circle_radius(Point::new(10.0, 10.0), Point::new(4.0, 2.0)),
            10.0
        );
    }

    #[test]
    fn triangle_mirrors_current_point() {
        let [a, b, c] = triangle_vertices(Point::new(20.0, 20.0), Point::new(30.0, 50.0));
        assert_eq!(a, Point::new(20.0, 20.0));
        assert_eq!(b, Point::new(30.0, 50.0));
        assert_eq!(c, Point::new(10.0, 50.0));
    }
}
