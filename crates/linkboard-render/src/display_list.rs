//! Backend-neutral renderer that records draw commands.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::{Point, Rect};
use linkboard_core::shapes::{ConnectorGeometry, TextBox, TextStyle};
use peniko::Color;

/// Stroke width of an unselected box outline.
const STROKE_WIDTH: f64 = 1.0;
/// Stroke width of a selected box outline.
const SELECTED_STROKE_WIDTH: f64 = 2.0;
/// Stroke width of connector lines.
const CONNECTOR_WIDTH: f64 = 2.0;
/// Slack when deciding whether a line still fits vertically.
const FIT_EPSILON: f64 = 1e-9;

/// One drawing instruction, in canvas coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill the whole canvas extent.
    Clear { extent: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f64 },
    FillRect { rect: Rect, color: Color },
    /// A single line of text whose top-left corner is `origin`, clipped to `clip`.
    Text {
        text: String,
        origin: Point,
        clip: Rect,
        font_size: f64,
        color: Color,
    },
    Line { from: Point, to: Point, color: Color, width: f64 },
    FillPolygon { points: Vec<Point>, color: Color },
}

/// Renderer that collects a display list for a host to replay.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn render_shape(&mut self, shape: &TextBox, ctx: &RenderContext, style: &TextStyle) {
        let (color, width) = if shape.is_selected() {
            (ctx.selection_color, SELECTED_STROKE_WIDTH)
        } else {
            (ctx.stroke_color, STROKE_WIDTH)
        };
        self.commands.push(DrawCommand::StrokeRect {
            rect: shape.bounds(),
            color,
            width,
        });
        self.commands.push(DrawCommand::FillRect {
            rect: shape.handle_region(),
            color: ctx.handle_color,
        });
        self.render_label(shape, ctx.text_color, style);
    }

    fn render_label(&mut self, shape: &TextBox, color: Color, style: &TextStyle) {
        let clip = shape.text_rect();
        let line_height = style.line_height();
        for (index, line) in shape.lines().iter().enumerate() {
            let top = clip.y0 + index as f64 * line_height;
            // Lines below the box are clipped away entirely.
            if top + line_height > clip.y1 + FIT_EPSILON {
                break;
            }
            self.commands.push(DrawCommand::Text {
                text: style.elide(line, clip.width()),
                origin: Point::new(clip.x0, top),
                clip,
                font_size: style.font_size,
                color,
            });
        }
    }

    fn render_connector(&mut self, geometry: &ConnectorGeometry, color: Color) {
        self.commands.push(DrawCommand::Line {
            from: geometry.start,
            to: geometry.end,
            color,
            width: CONNECTOR_WIDTH,
        });
        self.commands.push(DrawCommand::FillPolygon {
            points: geometry.arrowhead.to_vec(),
            color,
        });
    }
}

fn check_style(style: &TextStyle) -> RenderResult<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(style.char_width()) && valid(style.line_height()) {
        Ok(())
    } else {
        Err(RendererError::InvalidStyle(format!(
            "glyph width {} and line height {} must be positive",
            style.char_width(),
            style.line_height()
        )))
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.commands.clear();
        let style = &ctx.canvas.config().text;
        check_style(style)?;

        self.commands.push(DrawCommand::Clear {
            extent: ctx.canvas.extent(),
            color: self.background_color(ctx),
        });

        // Shapes in creation order; the one being edited is drawn too.
        for shape in ctx.canvas.shapes() {
            self.render_shape(shape, ctx, style);
        }

        for (_, geometry) in ctx.canvas.connector_geometries() {
            self.render_connector(&geometry, ctx.stroke_color);
        }

        log::trace!("built display list with {} commands", self.commands.len());
        Ok(())
    }
}
