//! Canvas configuration.

use crate::shapes::{ConnectorStyle, TextStyle};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Tunables for a canvas. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Extent never shrinks below this rectangle.
    pub min_extent: Rect,
    /// Label given to newly added boxes.
    pub default_label: String,
    /// Where `add_shape` places new boxes.
    pub default_position: Point,
    /// Size of new boxes before growing to fit the label.
    pub default_size: Size,
    pub text: TextStyle,
    pub connector: ConnectorStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_extent: Rect::new(0.0, 0.0, 640.0, 480.0),
            default_label: "Edit me".to_string(),
            default_position: Point::ZERO,
            default_size: Size::new(100.0, 50.0),
            text: TextStyle::default(),
            connector: ConnectorStyle::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Size of a new box: the default, grown to fit the default label.
    pub fn initial_size(&self) -> Size {
        let needed = self.text.padded_size(&self.default_label);
        Size::new(
            self.default_size.width.max(needed.width),
            self.default_size.height.max(needed.height),
        )
    }
}
