//! Shape definitions for the canvas.

mod connector;
mod text_box;
mod text_layout;

pub use connector::{
    Connector, ConnectorGeometry, ConnectorId, ConnectorStyle, Routing, endpoints, route,
};
pub use text_box::TextBox;
pub use text_layout::{ELLIPSIS, TEXT_PADDING, TextStyle};

use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;
