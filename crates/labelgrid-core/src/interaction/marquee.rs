//! Rubber-band selection over labels.

use crate::geometry::{intersects, rect_between};
use crate::label::LabelId;
use crate::selection::Selection;
use kurbo::{Point, Rect};

/// State of a marquee gesture, started by pressing on a label's background.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeState {
    pub start_point: Point,
    /// Label under the initial press, selected on release if no drag happened.
    pub clicked_label: Option<LabelId>,
    /// The multi-select modifier was held at press time.
    pub additive: bool,
    /// The pointer has passed the threshold at least once.
    pub has_dragged: bool,
    /// Travel needed on either axis (strictly exceeded) to start the marquee.
    pub threshold: f64,
}

impl MarqueeState {
    pub fn new(start_point: Point, clicked_label: Option<LabelId>, additive: bool, threshold: f64) -> Self {
        Self {
            start_point,
            clicked_label,
            additive,
            has_dragged: false,
            threshold,
        }
    }

    /// Feed a pointer move, updating the marked labels.
    ///
    /// `labels` yields every label with its sheet-space bounds. Returns the
    /// marquee rectangle when the move is past the threshold.
    pub fn update<I>(&mut self, current: Point, labels: I, selection: &mut Selection) -> Option<Rect>
    where
        I: IntoIterator<Item = (LabelId, Rect)>,
    {
        let delta = current - self.start_point;
        if delta.x.abs() <= self.threshold && delta.y.abs() <= self.threshold {
            return None;
        }

        if !self.has_dragged {
            log::debug!("Marquee started at {:?}", self.start_point);
            if !self.additive {
                selection.clear();
            }
            self.has_dragged = true;
        }

        let rect = rect_between(self.start_point, current);
        for (id, bounds) in labels {
            if intersects(bounds, rect) {
                selection.mark(id);
            } else if !self.additive {
                selection.unmark(id);
            }
        }
        Some(rect)
    }

    /// Finish the gesture on pointer-up.
    ///
    /// Without a drag this is a plain click on the label. After a drag the
    /// most recently marked label becomes the active one.
    pub fn finish(&self, selection: &mut Selection) {
        if !self.has_dragged {
            if let Some(label) = self.clicked_label {
                selection.select_label(label, self.additive);
            }
        } else if let Some(&last) = selection.marked().last() {
            selection.set_active_label(Some(last));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<(LabelId, Rect)> {
        vec![
            (0, Rect::new(0.0, 0.0, 90.0, 50.0)),
            (1, Rect::new(100.0, 0.0, 190.0, 50.0)),
            (2, Rect::new(200.0, 0.0, 290.0, 50.0)),
            (3, Rect::new(0.0, 60.0, 90.0, 110.0)),
        ]
    }

    #[test]
    fn test_below_threshold_is_a_click() {
        let mut selection = Selection::new();
        let mut marquee = MarqueeState::new(Point::new(50.0, 5.0), Some(0), false, 5.0);
        assert_eq!(marquee.update(Point::new(55.0, 10.0), row(), &mut selection), None);
        marquee.finish(&mut selection);
        assert_eq!(selection.label(), Some(0));
        assert_eq!(selection.marked(), &[0]);
    }

    #[test]
    fn test_marks_intersecting_labels() {
        let mut selection = Selection::new();
        selection.select_label(3, false);
        let mut marquee = MarqueeState::new(Point::new(50.0, 0.0), Some(0), false, 5.0);
        let rect = marquee.update(Point::new(250.0, 10.0), row(), &mut selection);
        assert_eq!(rect, Some(Rect::new(50.0, 0.0, 250.0, 10.0)));
        assert_eq!(selection.marked(), &[0, 1, 2]);

        marquee.finish(&mut selection);
        assert_eq!(selection.label(), Some(2));
    }

    #[test]
    fn test_shrinking_marquee_unmarks() {
        let mut selection = Selection::new();
        let mut marquee = MarqueeState::new(Point::new(50.0, 0.0), Some(0), false, 5.0);
        marquee.update(Point::new(250.0, 10.0), row(), &mut selection);
        marquee.update(Point::new(120.0, 10.0), row(), &mut selection);
        assert_eq!(selection.marked(), &[0, 1]);
    }

    #[test]
    fn test_additive_keeps_outside_marks() {
        let mut selection = Selection::new();
        selection.select_label(3, false);
        let mut marquee = MarqueeState::new(Point::new(50.0, 0.0), Some(0), true, 5.0);
        marquee.update(Point::new(150.0, 10.0), row(), &mut selection);
        assert_eq!(selection.marked(), &[3, 0, 1]);
        marquee.finish(&mut selection);
        assert_eq!(selection.label(), Some(1));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut selection = Selection::new();
        let mut marquee = MarqueeState::new(Point::new(0.0, 0.0), Some(0), false, 5.0);
        assert_eq!(marquee.update(Point::new(5.0, 5.0), row(), &mut selection), None);
        assert!(!marquee.has_dragged);
        assert!(marquee.update(Point::new(5.1, 0.0), row(), &mut selection).is_some());
    }
}
