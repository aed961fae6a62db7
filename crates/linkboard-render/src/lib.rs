//! Linkboard Render Library
//!
//! Renderer abstraction for Linkboard. The bundled implementation records
//! a display list of backend-neutral draw commands.

mod display_list;
mod renderer;

pub use display_list::{DisplayListRenderer, DrawCommand};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
