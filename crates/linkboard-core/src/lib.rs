//! Linkboard Core Library
//!
//! Platform-agnostic data structures and logic for the Linkboard diagram
//! canvas: text boxes, the connectors between them, and their persistence.

pub mod canvas;
pub mod config;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod storage;
pub mod widget;

pub use canvas::{Canvas, CanvasDocument, CanvasError};
pub use config::CanvasConfig;
pub use geometry::GeometryError;
pub use input::{ClickTracker, Modifiers, MouseButton, PointerEvent};
pub use shapes::{Connector, ConnectorGeometry, ConnectorId, ConnectorStyle, ShapeId, TextBox};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, load_from_path, save_to_path};
pub use widget::{HANDLE_SIZE, Handle, InteractionMode};
