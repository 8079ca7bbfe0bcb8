//! Image element backed by a data URI.

use super::Frame;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Raster formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Sniff the format from the file signature.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// An image placed on a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(flatten)]
    pub frame: Frame,
    /// Opaque resource reference, normally a `data:` URI.
    pub src: String,
    /// 0.0 = fully transparent, 1.0 = fully opaque.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl ImageElement {
    /// Create an image element referencing `src` at the default placement.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            frame: Frame::new(10.0, 10.0, 80.0, 80.0),
            src: src.into(),
            opacity: 1.0,
        }
    }

    /// Create an image element from raw file bytes.
    ///
    /// Returns `None` when the bytes are not a recognized raster format.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let format = ImageFormat::from_magic_bytes(data)?;
        let src = format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(data));
        Some(Self::new(src))
    }

    /// Decode the payload of a base64 `data:` URI source.
    pub fn data(&self) -> Option<Vec<u8>> {
        let rest = self.src.strip_prefix("data:")?;
        let (_, payload) = rest.split_once(";base64,")?;
        STANDARD.decode(payload).ok()
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
    }

    /// Apply edited property-panel fields.
    pub fn apply(&mut self, patch: &ImagePatch) {
        if let Some(percent) = patch.opacity_percent {
            self.set_opacity(f64::from(percent.clamp(0, 100)) / 100.0);
        }
    }

    /// Opacity as a whole percentage, as shown in the property panel.
    pub fn opacity_percent(&self) -> i32 {
        (self.opacity * 100.0).round() as i32
    }
}

/// Partial update written back by the property panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePatch {
    /// Opacity in percent; values outside `0..=100` are clamped.
    pub opacity_percent: Option<i32>,
}

impl ImagePatch {
    /// Build a patch from raw panel input. Non-numeric input means fully opaque.
    pub fn from_input(input: &str) -> Self {
        Self {
            opacity_percent: Some(input.trim().parse().unwrap_or(100)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::from_magic_bytes(&PNG_HEADER), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(b"hi"), None);
    }

    #[test]
    fn test_from_bytes_builds_data_uri() {
        let image = ImageElement::from_bytes(&PNG_HEADER).unwrap();
        assert!(image.src.starts_with("data:image/png;base64,"));
        assert_eq!(image.data().as_deref(), Some(&PNG_HEADER[..]));
        assert_eq!((image.frame.width, image.frame.height), (80.0, 80.0));
        assert_eq!(image.opacity, 1.0);
    }

    #[test]
    fn test_from_bytes_rejects_unknown() {
        assert!(ImageElement::from_bytes(b"plain text").is_none());
    }

    #[test]
    fn test_opacity_patch_clamps_percent() {
        let mut image = ImageElement::new("x");
        image.apply(&ImagePatch { opacity_percent: Some(250) });
        assert_eq!(image.opacity, 1.0);
        image.apply(&ImagePatch { opacity_percent: Some(-5) });
        assert_eq!(image.opacity, 0.0);
        image.apply(&ImagePatch { opacity_percent: Some(40) });
        assert!((image.opacity - 0.4).abs() < f64::EPSILON);
        assert_eq!(image.opacity_percent(), 40);
    }

    #[test]
    fn test_non_numeric_input_is_opaque() {
        let mut image = ImageElement::new("x");
        image.set_opacity(0.2);
        image.apply(&ImagePatch::from_input("abc"));
        assert_eq!(image.opacity, 1.0);
    }
}
