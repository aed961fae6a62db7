//! Pointer events forwarded to the canvas by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl or Shift adds to the selection instead of replacing it.
    pub fn extends_selection(&self) -> bool {
        self.ctrl || self.shift
    }
}

/// One user gesture step, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Press {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Release {
        position: Point,
    },
    DoubleClick {
        position: Point,
    },
    /// The editor lost keyboard focus.
    FocusLost,
}

impl PointerEvent {
    /// Left-button press without modifiers.
    pub fn press(position: Point) -> Self {
        Self::Press {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Press { position, .. }
            | Self::Move { position }
            | Self::Release { position }
            | Self::DoubleClick { position } => Some(position),
            Self::FocusLost => None,
        }
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Turns raw presses into double-clicks for hosts that only report presses.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click: Option<(Instant, Point)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a left press at `at`. Returns true if it completes a double-click.
    pub fn register_press(&mut self, position: Point, at: Instant) -> bool {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = at.saturating_duration_since(last_time);
            if elapsed < DOUBLE_CLICK_TIME && (position - last_pos).hypot() < DOUBLE_CLICK_DISTANCE {
                // Reset so a third click starts over.
                self.last_click = None;
                return true;
            }
        }
        self.last_click = Some((at, position));
        false
    }

    /// Press followed by a `DoubleClick` when the press completes one.
    pub fn expand(&mut self, event: PointerEvent, at: Instant) -> Vec<PointerEvent> {
        match event {
            PointerEvent::Press {
                position,
                button: MouseButton::Left,
                ..
            } if self.register_press(position, at) => {
                vec![event, PointerEvent::DoubleClick { position }]
            }
            _ => vec![event],
        }
    }
}
