//! Text element.

use super::Frame;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of text inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// A block of styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub frame: Frame,
    pub content: String,
    pub font_family: String,
    /// Font size in layout units (always at least 1).
    pub font_size: u32,
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            frame: Frame::new(10.0, 10.0, 80.0, 30.0),
            content: "New Text".to_string(),
            font_family: "Arial".to_string(),
            font_size: 16,
            color: "#000000".to_string(),
            bold: false,
            italic: false,
            underline: false,
            align: TextAlign::Center,
        }
    }
}

impl TextElement {
    /// Create a text element with default styling.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Apply edited property-panel fields.
    pub fn apply(&mut self, patch: &TextPatch) {
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(family) = &patch.font_family {
            self.font_family.clone_from(family);
        }
        if let Some(size) = patch.font_size {
            self.font_size = size.max(1);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(align) = patch.align {
            self.align = align;
        }
    }
}

/// Partial update written back by the property panel.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPatch {
    pub content: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub align: Option<TextAlign>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let text = TextElement::default();
        assert_eq!(text.content, "New Text");
        assert_eq!(text.font_size, 16);
        assert_eq!(text.align, TextAlign::Center);
        assert_eq!((text.frame.width, text.frame.height), (80.0, 30.0));
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut text = TextElement::new("Hello");
        text.apply(&TextPatch {
            bold: Some(true),
            align: Some(TextAlign::Right),
            ..TextPatch::default()
        });
        assert!(text.bold);
        assert_eq!(text.align, TextAlign::Right);
        assert_eq!(text.content, "Hello");
        assert_eq!(text.font_family, "Arial");
    }

    #[test]
    fn test_font_size_never_zero() {
        let mut text = TextElement::default();
        text.apply(&TextPatch {
            font_size: Some(0),
            ..TextPatch::default()
        });
        assert_eq!(text.font_size, 1);
    }
}
