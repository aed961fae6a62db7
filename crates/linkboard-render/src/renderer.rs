//! Renderer trait abstraction.

use linkboard_core::canvas::Canvas;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid text style: {0}")]
    InvalidStyle(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Background color.
    pub background_color: Color,
    /// Outline color of selected boxes.
    pub selection_color: Color,
    /// Outline color of unselected boxes and connectors.
    pub stroke_color: Color,
    /// Fill of the resize handle.
    pub handle_color: Color,
    pub text_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(255, 0, 0, 255), // Red
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            handle_color: Color::from_rgba8(0, 0, 0, 255),
            text_color: Color::from_rgba8(0, 0, 0, 255),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    pub fn with_handle_color(mut self, color: Color) -> Self {
        self.handle_color = color;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations turn a canvas into whatever their target consumes:
/// a GPU scene, an SVG document, or a plain list of draw commands.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
