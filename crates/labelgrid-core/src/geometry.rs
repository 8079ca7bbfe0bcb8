//! Axis-aligned rectangle helpers.
//!
//! Label bounding boxes, element frames and the marquee are all plain
//! `kurbo::Rect`s. The overlap rule used here is inclusive: rectangles that
//! merely touch along an edge still count as intersecting.

use kurbo::{Point, Rect, Size};

/// Check whether two rectangles overlap, edges included.
pub fn intersects(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// Rectangle with its top-left corner at `origin`.
pub fn bounding_rect(origin: Point, width: f64, height: f64) -> Rect {
    Rect::from_origin_size(origin, Size::new(width, height))
}

/// Normalized rectangle spanned by two corner points.
pub fn rect_between(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Point-in-rectangle test, edges included.
///
/// `kurbo::Rect::contains` excludes the right and bottom edges; hit testing
/// on labels wants the closed box instead.
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(intersects(a, b));
        assert!(intersects(b, a));
    }

    #[test]
    fn test_intersects_touching_edge() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(intersects(a, b));
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(a, Rect::new(10.5, 0.0, 20.0, 10.0)));
        assert!(!intersects(a, Rect::new(0.0, 11.0, 10.0, 20.0)));
    }

    #[test]
    fn test_bounding_rect() {
        let r = bounding_rect(Point::new(100.0, 20.0), 90.0, 40.0);
        assert_eq!(r, Rect::new(100.0, 20.0, 190.0, 60.0));
    }

    #[test]
    fn test_rect_between_normalizes() {
        let r = rect_between(Point::new(50.0, 40.0), Point::new(10.0, 0.0));
        assert_eq!(r, Rect::new(10.0, 0.0, 50.0, 40.0));
    }

    #[test]
    fn test_contains_inclusive_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(contains_inclusive(r, Point::new(10.0, 10.0)));
        assert!(contains_inclusive(r, Point::new(0.0, 5.0)));
        assert!(!contains_inclusive(r, Point::new(10.1, 5.0)));
    }
}
