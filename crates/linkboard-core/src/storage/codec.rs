//! JSON document format for saved canvases.
//!
//! A document is an array of shape records:
//!
//! ```json
//! [
//!   { "type": "DraggableTextItem", "text": "Hello",
//!     "x": 0.0, "y": 0.0, "width": 100.0, "height": 50.0 }
//! ]
//! ```
//!
//! Unknown fields are ignored. Connectors are not part of the format.

use crate::canvas::CanvasError;
use crate::shapes::TextBox;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// One persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeRecord {
    DraggableTextItem {
        text: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl ShapeRecord {
    pub fn from_shape(shape: &TextBox) -> Self {
        let bounds = shape.bounds();
        Self::DraggableTextItem {
            text: shape.text().to_string(),
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    /// Build the shape this record describes, rejecting unusable geometry.
    pub fn into_shape(self) -> Result<TextBox, String> {
        let Self::DraggableTextItem {
            text,
            x,
            y,
            width,
            height,
        } = self;
        if !(x.is_finite() && y.is_finite()) {
            return Err(format!("position ({x}, {y}) is not finite"));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(format!("size {width}x{height} is not positive"));
        }
        Ok(TextBox::new(Point::new(x, y), Size::new(width, height), text))
    }
}

/// Encode shapes in the given order as pretty-printed JSON.
pub fn encode<'a>(shapes: impl IntoIterator<Item = &'a TextBox>) -> Result<String, serde_json::Error> {
    let records: Vec<ShapeRecord> = shapes.into_iter().map(ShapeRecord::from_shape).collect();
    serde_json::to_string_pretty(&records)
}

/// Parse and validate a whole document. Fails on the first bad record.
pub fn decode(json: &str) -> Result<Vec<TextBox>, CanvasError> {
    let records: Vec<ShapeRecord> =
        serde_json::from_str(json).map_err(|e| CanvasError::MalformedDocument(e.to_string()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_shape()
                .map_err(|reason| CanvasError::MalformedDocument(format!("record {index}: {reason}")))
        })
        .collect()
}
