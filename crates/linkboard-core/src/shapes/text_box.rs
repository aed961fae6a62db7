//! Draggable, resizable text box.

use super::ShapeId;
use super::text_layout::{TEXT_PADDING, TextStyle};
use crate::geometry::rect_contains;
use crate::widget::{HANDLE_SIZE, Handle, InteractionMode};
use kurbo::{Point, Rect, Size, Vec2};
use uuid::Uuid;

/// A labeled rectangle the user can move, resize and edit.
#[derive(Debug, Clone)]
pub struct TextBox {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    position: Point,
    width: f64,
    height: f64,
    /// Label text.
    text: String,
    selected: bool,
    mode: InteractionMode,
    /// Label wrapped to the current width. Rebuilt by `relayout`.
    lines: Vec<String>,
}

impl TextBox {
    /// Smallest width or height a box may have; it always fits the handle.
    pub const MIN_SIZE: f64 = HANDLE_SIZE;

    /// Create a new box. Sizes below `MIN_SIZE` are raised to it.
    pub fn new(position: Point, size: Size, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: size.width.max(Self::MIN_SIZE),
            height: size.height.max(Self::MIN_SIZE),
            text: text.into(),
            selected: false,
            mode: InteractionMode::Idle,
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding rectangle in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Label lines as last laid out.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Area available to the label after padding.
    pub fn text_rect(&self) -> Rect {
        self.bounds().inflate(-TEXT_PADDING, -TEXT_PADDING)
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn toggle_selected(&mut self) {
        self.selected = !self.selected;
    }

    /// Check if a point hits the box (edges included).
    pub fn contains(&self, point: Point) -> bool {
        rect_contains(self.bounds(), point)
    }

    pub fn handle(&self) -> Handle {
        Handle::for_bounds(self.bounds(), HANDLE_SIZE)
    }

    /// Resize handle square at the bottom-right corner.
    pub fn handle_region(&self) -> Rect {
        self.handle().region
    }

    pub fn handle_contains(&self, point: Point) -> bool {
        self.handle().hit_test(point)
    }

    /// Move the top-left corner. Rejected while resizing or editing.
    pub fn move_to(&mut self, position: Point) -> bool {
        if self.mode.is_resizing() || self.mode.is_editing() {
            return false;
        }
        self.position = position;
        true
    }

    pub fn translate(&mut self, delta: Vec2) -> bool {
        self.move_to(self.position + delta)
    }

    /// Start following the pointer.
    pub fn begin_drag(&mut self) -> bool {
        if !self.mode.is_idle() {
            return false;
        }
        self.mode = InteractionMode::Dragging {
            origin: self.position,
        };
        true
    }

    /// Place the box at its drag origin offset by `delta`.
    pub fn drag_by(&mut self, delta: Vec2) -> bool {
        let InteractionMode::Dragging { origin } = self.mode else {
            return false;
        };
        self.position = origin + delta;
        true
    }

    pub fn end_drag(&mut self) -> bool {
        if !self.mode.is_dragging() {
            return false;
        }
        self.mode = InteractionMode::Idle;
        true
    }

    /// Enter resizing if `at` falls on the handle.
    pub fn begin_resize(&mut self, at: Point) -> bool {
        if !self.mode.is_idle() || !self.handle_contains(at) {
            return false;
        }
        self.mode = InteractionMode::Resizing {
            start_point: at,
            start_rect: self.bounds(),
        };
        true
    }

    /// Grow the starting rectangle's far corner by `delta`.
    ///
    /// The result is normalized (corners swapped if dragged past the
    /// opposite edge) and then floored at `MIN_SIZE`.
    pub fn update_resize(&mut self, delta: Vec2) -> bool {
        let InteractionMode::Resizing { start_rect, .. } = self.mode else {
            return false;
        };
        let mut rect = Rect::new(
            start_rect.x0,
            start_rect.y0,
            start_rect.x1 + delta.x,
            start_rect.y1 + delta.y,
        )
        .abs();
        if rect.width() < Self::MIN_SIZE {
            rect.x1 = rect.x0 + Self::MIN_SIZE;
        }
        if rect.height() < Self::MIN_SIZE {
            rect.y1 = rect.y0 + Self::MIN_SIZE;
        }
        self.position = rect.origin();
        self.width = rect.width();
        self.height = rect.height();
        true
    }

    pub fn end_resize(&mut self) -> bool {
        if !self.mode.is_resizing() {
            return false;
        }
        self.mode = InteractionMode::Idle;
        true
    }

    /// Open the label for editing.
    pub fn begin_edit(&mut self) -> bool {
        if !self.mode.is_idle() {
            return false;
        }
        self.mode = InteractionMode::Editing;
        true
    }

    /// Replace the label and leave editing.
    ///
    /// Empty text is treated as a cancel. The box grows to fit the new
    /// label plus padding but never shrinks. Returns true if the label
    /// changed.
    pub fn commit_edit(&mut self, text: &str, style: &TextStyle) -> bool {
        if !self.mode.is_editing() {
            return false;
        }
        self.mode = InteractionMode::Idle;
        if text.is_empty() {
            return false;
        }
        self.text = text.to_string();
        let needed = style.padded_size(&self.text);
        self.width = self.width.max(needed.width);
        self.height = self.height.max(needed.height);
        self.relayout(style);
        true
    }

    pub fn cancel_edit(&mut self) -> bool {
        if !self.mode.is_editing() {
            return false;
        }
        self.mode = InteractionMode::Idle;
        true
    }

    /// Wrap the label to the current width.
    pub fn relayout(&mut self, style: &TextStyle) {
        self.lines = style.wrap(&self.text, self.text_rect().width());
    }

    /// Abandon any drag or resize in progress.
    pub(crate) fn finish_gesture(&mut self) -> bool {
        self.end_drag() || self.end_resize()
    }

    /// Drop whatever gesture or edit the box was in.
    pub(crate) fn reset_mode(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
