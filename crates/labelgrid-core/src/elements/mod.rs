//! Element definitions for label content.

mod image;
mod text;

pub use image::{ImageElement, ImageFormat, ImagePatch};
pub use text::{TextAlign, TextElement, TextPatch};

use crate::geometry::bounding_rect;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Unique identifier for elements within a label.
pub type ElementId = u64;

/// Smallest width or height an element may have, in layout units.
pub const MIN_ELEMENT_SIZE: f64 = 30.0;

/// Position and size shared by every element variant.
///
/// Coordinates are label-local: `(0, 0)` is the top-left corner of the
/// owning label's content area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: 0,
            x,
            y,
            width: width.max(MIN_ELEMENT_SIZE),
            height: height.max(MIN_ELEMENT_SIZE),
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding box in label-local coordinates.
    pub fn bounds(&self) -> Rect {
        bounding_rect(self.origin(), self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    /// Set the size, enforcing the minimum on both axes.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(MIN_ELEMENT_SIZE);
        self.height = height.max(MIN_ELEMENT_SIZE);
    }

    /// Bring a frame from an untrusted source back within the size floor.
    pub fn normalize(&mut self) {
        self.set_size(self.width, self.height);
    }
}

/// A text or image object placed on a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        self.frame().id
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Element::Text(t) => &t.frame,
            Element::Image(i) => &i.frame,
        }
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        match self {
            Element::Text(t) => &mut t.frame,
            Element::Image(i) => &mut i.frame,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.frame().bounds()
    }

    /// Replace the element's id (used when the element is duplicated).
    pub fn set_id(&mut self, id: ElementId) {
        self.frame_mut().id = id;
    }

    /// Copy of this element carrying a different id.
    pub fn with_id(&self, id: ElementId) -> Self {
        let mut element = self.clone();
        element.set_id(id);
        element
    }

    /// Whether pressing on this element lands in an editable text region.
    pub fn is_editable_text(&self) -> bool {
        matches!(self, Element::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageElement> {
        match self {
            Element::Image(i) => Some(i),
            _ => None,
        }
    }

    /// Clamp every numeric field into its valid range.
    pub fn normalize(&mut self) {
        self.frame_mut().normalize();
        match self {
            Element::Text(t) => t.font_size = t.font_size.max(1),
            Element::Image(i) => i.set_opacity(i.opacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_enforces_minimum() {
        let frame = Frame::new(0.0, 0.0, 5.0, 100.0);
        assert_eq!(frame.width, MIN_ELEMENT_SIZE);
        assert_eq!(frame.height, 100.0);
    }

    #[test]
    fn test_frame_center() {
        let frame = Frame::new(10.0, 20.0, 80.0, 40.0);
        assert_eq!(frame.center(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_with_id_leaves_original() {
        let element = Element::Text(TextElement::default());
        let copy = element.with_id(77);
        assert_eq!(copy.id(), 77);
        assert_eq!(element.id(), 0);
        assert_eq!(copy.as_text().map(|t| t.content.as_str()), Some("New Text"));
    }

    #[test]
    fn test_text_serializes_flat_with_discriminant() {
        let mut element = Element::Text(TextElement::default());
        element.set_id(1_700_000_000_000);
        let value = serde_json::to_value(&element).unwrap();

        assert_eq!(value["type"], "text");
        assert_eq!(value["id"], 1_700_000_000_000u64);
        assert_eq!(value["fontSize"], 16);
        assert_eq!(value["fontFamily"], "Arial");
        assert_eq!(value["align"], "center");
        assert_eq!(value["x"], 10.0);
    }

    #[test]
    fn test_image_deserializes_without_opacity() {
        let json = r#"{"type":"image","id":5,"src":"data:image/png;base64,AA==","x":1,"y":2,"width":80,"height":80}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        let image = element.as_image().unwrap();
        assert_eq!(image.opacity, 1.0);
        assert_eq!(image.frame.x, 1.0);
    }

    #[test]
    fn test_normalize_clamps_loaded_values() {
        let json = r#"{"type":"image","id":5,"src":"x","x":0,"y":0,"width":3,"height":-4,"opacity":2.5}"#;
        let mut element: Element = serde_json::from_str(json).unwrap();
        element.normalize();
        assert_eq!(element.frame().width, MIN_ELEMENT_SIZE);
        assert_eq!(element.frame().height, MIN_ELEMENT_SIZE);
        assert_eq!(element.as_image().unwrap().opacity, 1.0);
    }
}
