//! Single-element resize from the bottom-right handle.

use crate::elements::{ElementId, MIN_ELEMENT_SIZE};
use crate::label::LabelId;
use kurbo::{Point, Size};

/// State of an element resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub label: LabelId,
    pub element: ElementId,
    pub start_point: Point,
    pub start_size: Size,
}

impl ResizeState {
    pub fn new(label: LabelId, element: ElementId, start_point: Point, start_size: Size) -> Self {
        Self {
            label,
            element,
            start_point,
            start_size,
        }
    }

    /// New element size for the pointer at `current`, floored at the
    /// minimum element size on both axes.
    pub fn update(&self, current: Point) -> Size {
        let delta = current - self.start_point;
        Size::new(
            (self.start_size.width + delta.x).max(MIN_ELEMENT_SIZE),
            (self.start_size.height + delta.y).max(MIN_ELEMENT_SIZE),
        )
    }
}
