//! Center-alignment snapping for dragged elements.

use crate::elements::Frame;
use kurbo::{Point, Size};

/// Distance (per axis) from the label center within which an element snaps.
pub const CENTER_SNAP_TOLERANCE: f64 = 2.0;

/// Which alignment guides the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guides {
    /// Vertical line through the label center (x is aligned).
    pub vertical: bool,
    /// Horizontal line through the label center (y is aligned).
    pub horizontal: bool,
}

impl Guides {
    pub const NONE: Guides = Guides {
        vertical: false,
        horizontal: false,
    };

    pub const BOTH: Guides = Guides {
        vertical: true,
        horizontal: true,
    };

    /// Check if any guide is visible.
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The (possibly corrected) top-left corner of the element.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }

    /// Guides to display for this result. An x snap aligns centers along a
    /// vertical line, a y snap along a horizontal one.
    pub fn guides(&self) -> Guides {
        Guides {
            vertical: self.snapped_x,
            horizontal: self.snapped_y,
        }
    }
}

/// Snap an element's frame to the center of a label content area of size
/// `content`.
///
/// Each axis is tested independently: when the element center lies strictly
/// within `tolerance` of the label center on that axis, the element is moved
/// so the centers coincide. The frame itself is not modified.
pub fn snap_to_center(frame: &Frame, content: Size, tolerance: f64) -> SnapResult {
    let label_center = Point::new(content.width / 2.0, content.height / 2.0);
    let center = frame.center();
    let mut result = SnapResult::none(frame.origin());

    if (center.x - label_center.x).abs() < tolerance {
        result.point.x = label_center.x - frame.width / 2.0;
        result.snapped_x = true;
    }
    if (center.y - label_center.y).abs() < tolerance {
        result.point.y = label_center.y - frame.height / 2.0;
        result.snapped_y = true;
    }

    result
}
