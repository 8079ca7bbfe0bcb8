//! Single-element move.

use crate::elements::ElementId;
use crate::label::LabelId;
use kurbo::{Point, Vec2};

/// Whether the pointer has travelled far enough to count as a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pressed, but still within the activation threshold.
    Armed,
    /// Moving the element with the pointer.
    Dragging,
}

/// State of an element move gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub label: LabelId,
    pub element: ElementId,
    pub phase: DragPhase,
    /// Pointer position at press time (sheet coordinates).
    pub start_point: Point,
    /// Element origin at press time (label-local coordinates).
    pub start_origin: Point,
    /// The press landed inside editable text.
    pub from_editable_text: bool,
    /// Travel needed on either axis before the element starts moving.
    pub threshold: f64,
}

impl DragState {
    pub fn new(
        label: LabelId,
        element: ElementId,
        start_point: Point,
        start_origin: Point,
        from_editable_text: bool,
        threshold: f64,
    ) -> Self {
        Self {
            label,
            element,
            phase: DragPhase::Armed,
            start_point,
            start_origin,
            from_editable_text,
            threshold,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self, current: Point) -> Vec2 {
        current - self.start_point
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Feed a pointer move. Returns the element's new (unsnapped) origin, or
    /// `None` when the element must stay put.
    ///
    /// A press that began in editable text never moves the element while the
    /// user has text selected.
    pub fn update(&mut self, current: Point, text_selection_active: bool) -> Option<Point> {
        if self.from_editable_text && text_selection_active {
            return None;
        }
        let delta = self.delta(current);
        if self.phase == DragPhase::Armed {
            if delta.x.abs() < self.threshold && delta.y.abs() < self.threshold {
                return None;
            }
            log::debug!("Drag of element {} activated", self.element);
            self.phase = DragPhase::Dragging;
        }
        Some(self.start_origin + delta)
    }
}
