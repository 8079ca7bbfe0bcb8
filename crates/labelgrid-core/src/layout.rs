//! Sheet layout: where each label sits and which region a point falls in.

use crate::elements::ElementId;
use crate::geometry::{bounding_rect, contains_inclusive};
use crate::label::{Label, LabelId};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Grid geometry of the label sheet, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub columns: u32,
    pub label_width: f64,
    pub label_height: f64,
    pub column_gap: f64,
    pub row_gap: f64,
    /// Inset between a label's outer edge and its content area.
    pub content_padding: f64,
    /// Side of the square resize handle at an element's bottom-right corner.
    pub handle_size: f64,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            label_width: 240.0,
            label_height: 110.0,
            column_gap: 12.0,
            row_gap: 0.0,
            content_padding: 6.0,
            handle_size: 10.0,
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Not on any label.
    Outside,
    /// Empty area of a label.
    LabelBackground(LabelId),
    /// The body of an element.
    ElementBody {
        label: LabelId,
        element: ElementId,
        editable_text: bool,
    },
    /// An element's resize handle.
    ResizeHandle { label: LabelId, element: ElementId },
}

impl SheetLayout {
    /// Outer bounding box of a label in sheet coordinates.
    pub fn label_bounds(&self, id: LabelId) -> Rect {
        let columns = self.columns.max(1);
        let col = f64::from(id % columns);
        let row = f64::from(id / columns);
        let origin = Point::new(
            col * (self.label_width + self.column_gap),
            row * (self.label_height + self.row_gap),
        );
        bounding_rect(origin, self.label_width, self.label_height)
    }

    /// Content area of a label in sheet coordinates.
    pub fn content_bounds(&self, id: LabelId) -> Rect {
        let bounds = self.label_bounds(id);
        let inset = self
            .content_padding
            .min(bounds.width() / 2.0)
            .min(bounds.height() / 2.0);
        Rect::new(
            bounds.x0 + inset,
            bounds.y0 + inset,
            bounds.x1 - inset,
            bounds.y1 - inset,
        )
    }

    /// Dimensions of a label's content area.
    pub fn content_size(&self) -> Size {
        self.content_bounds(0).size()
    }

    /// Convert a sheet point into a label's content-local space.
    pub fn to_label_local(&self, id: LabelId, point: Point) -> Point {
        point - self.content_offset(id)
    }

    /// Offset from label-local space back to sheet space.
    pub fn content_offset(&self, id: LabelId) -> Vec2 {
        self.content_bounds(id).origin().to_vec2()
    }

    /// The label whose outer box contains `point`, if any.
    pub fn label_at<'a>(&self, labels: &'a [Label], point: Point) -> Option<&'a Label> {
        labels
            .iter()
            .find(|label| contains_inclusive(self.label_bounds(label.id), point))
    }

    /// Resolve what a press at `point` (sheet coordinates) lands on.
    ///
    /// Elements are tested front to back, and each element's handle before
    /// its body.
    pub fn hit_test(&self, labels: &[Label], point: Point) -> HitTarget {
        let Some(label) = self.label_at(labels, point) else {
            return HitTarget::Outside;
        };
        let local = self.to_label_local(label.id, point);

        for element in label.elements.iter().rev() {
            let bounds = element.bounds();
            if !contains_inclusive(bounds, local) {
                continue;
            }
            let handle = Rect::new(
                bounds.x1 - self.handle_size,
                bounds.y1 - self.handle_size,
                bounds.x1,
                bounds.y1,
            );
            if contains_inclusive(handle, local) {
                return HitTarget::ResizeHandle {
                    label: label.id,
                    element: element.id(),
                };
            }
            return HitTarget::ElementBody {
                label: label.id,
                element: element.id(),
                editable_text: element.is_editable_text(),
            };
        }

        HitTarget::LabelBackground(label.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, ImageElement, TextElement};

    fn layout() -> SheetLayout {
        SheetLayout {
            columns: 3,
            label_width: 90.0,
            label_height: 50.0,
            column_gap: 10.0,
            row_gap: 5.0,
            content_padding: 5.0,
            handle_size: 10.0,
        }
    }

    #[test]
    fn test_label_bounds_grid() {
        let layout = layout();
        assert_eq!(layout.label_bounds(0), Rect::new(0.0, 0.0, 90.0, 50.0));
        assert_eq!(layout.label_bounds(2), Rect::new(200.0, 0.0, 290.0, 50.0));
        assert_eq!(layout.label_bounds(4), Rect::new(100.0, 55.0, 190.0, 105.0));
    }

    #[test]
    fn test_content_area() {
        let layout = layout();
        assert_eq!(layout.content_bounds(1), Rect::new(105.0, 5.0, 185.0, 45.0));
        assert_eq!(layout.content_size(), Size::new(80.0, 40.0));
        assert_eq!(layout.to_label_local(1, Point::new(110.0, 15.0)), Point::new(5.0, 10.0));
    }

    #[test]
    fn test_hit_test_regions() {
        let layout = layout();
        let mut labels = vec![Label::new(0), Label::new(1)];
        let mut text = TextElement::default();
        text.frame.x = 0.0;
        text.frame.y = 0.0;
        text.frame.set_size(40.0, 30.0);
        labels[0].add_element(Element::Text(text), 7);

        // Content origin of label 0 is (5, 5).
        assert_eq!(
            layout.hit_test(&labels, Point::new(10.0, 10.0)),
            HitTarget::ElementBody { label: 0, element: 7, editable_text: true }
        );
        assert_eq!(
            layout.hit_test(&labels, Point::new(43.0, 33.0)),
            HitTarget::ResizeHandle { label: 0, element: 7 }
        );
        assert_eq!(layout.hit_test(&labels, Point::new(80.0, 40.0)), HitTarget::LabelBackground(0));
        assert_eq!(layout.hit_test(&labels, Point::new(95.0, 10.0)), HitTarget::Outside);
        assert_eq!(layout.hit_test(&labels, Point::new(150.0, 20.0)), HitTarget::LabelBackground(1));
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let layout = layout();
        let mut labels = vec![Label::new(0)];
        let mut below = TextElement::default();
        below.frame.x = 0.0;
        below.frame.y = 0.0;
        let mut above = ImageElement::new("x");
        above.frame.x = 0.0;
        above.frame.y = 0.0;
        labels[0].add_element(Element::Text(below), 1);
        labels[0].add_element(Element::Image(above), 2);

        assert_eq!(
            layout.hit_test(&labels, Point::new(10.0, 10.0)),
            HitTarget::ElementBody { label: 0, element: 2, editable_text: false }
        );
    }
}
