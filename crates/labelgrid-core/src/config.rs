//! Editor configuration.

use crate::label::DEFAULT_BACKGROUND;
use crate::layout::SheetLayout;
use serde::{Deserialize, Serialize};

/// Tunables for a label sheet session.
///
/// Every field has a default, so a config file only needs to mention what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Number of labels created at startup.
    pub label_count: u32,
    pub layout: SheetLayout,
    /// Distance from the label center within which a dragged element snaps.
    pub snap_tolerance: f64,
    /// Pointer travel required before an element press becomes a move.
    pub drag_threshold: f64,
    /// Pointer travel required before a background press becomes a marquee.
    pub marquee_threshold: f64,
    pub default_background: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            label_count: 30,
            layout: SheetLayout::default(),
            snap_tolerance: 2.0,
            drag_threshold: 2.0,
            marquee_threshold: 5.0,
            default_background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "label_count": 12, "layout": { "columns": 2 } }"#).unwrap();
        assert_eq!(config.label_count, 12);
        assert_eq!(config.layout.columns, 2);
        assert_eq!(config.layout.label_width, SheetLayout::default().label_width);
        assert_eq!(config.snap_tolerance, 2.0);
    }
}
