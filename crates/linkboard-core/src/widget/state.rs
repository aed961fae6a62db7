//! Interaction state for a text box.

use kurbo::{Point, Rect};

/// What the user is currently doing with a box.
///
/// Gesture data lives in the variant so it cannot outlive the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Box follows the pointer. `origin` is its position when the drag began.
    Dragging { origin: Point },
    /// Bottom-right corner follows the pointer.
    Resizing {
        /// Pointer position when the resize began.
        start_point: Point,
        /// Box rectangle when the resize began.
        start_rect: Rect,
    },
    /// Label is open in an editor.
    Editing,
}

impl InteractionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Editing => "editing",
        }
    }
}
