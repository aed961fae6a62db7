//! Application commands and configuration.

use clap::{Parser, Subcommand};
use kurbo::Point;
use linkboard_core::canvas::{Canvas, CanvasError};
use linkboard_core::config::CanvasConfig;
use linkboard_core::storage::{StorageError, load_from_path, save_to_path};
use linkboard_render::{DisplayListRenderer, RenderContext, Renderer, RendererError};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "LINKBOARD_CONFIG";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config {path}: {reason}")]
    ConfigIo { path: PathBuf, reason: String },
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Diagram canvas with connected text boxes
#[derive(Parser, Debug)]
#[command(name = "linkboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON canvas configuration
    #[arg(long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// What the binary was asked to do.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build a small connected canvas and save it
    Demo {
        /// Where to write the canvas
        file: PathBuf,
    },
    /// Load a canvas and describe what would be drawn
    Inspect {
        /// Canvas file to read
        file: PathBuf,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
}

impl AppConfig {
    /// Read `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|e| AppError::ConfigIo {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let canvas = CanvasConfig::from_json(&json)?;
        log::info!("Loaded config from: {:?}", path);
        Ok(Self { canvas })
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run a command and return the text to print.
    pub fn run(&self, command: &Command) -> Result<String, AppError> {
        match command {
            Command::Demo { file: path } => {
                let canvas = self.demo_canvas()?;
                save_to_path(&canvas, path)?;
                Ok(format!(
                    "Saved {} shapes to {}",
                    canvas.shapes().count(),
                    path.display()
                ))
            }
            Command::Inspect { file: path } => {
                let mut canvas = Canvas::with_config(self.config.canvas.clone());
                load_from_path(&mut canvas, path)?;
                self.describe(&canvas)
            }
        }
    }

    /// Two labeled boxes joined by a connector.
    pub fn demo_canvas(&self) -> Result<Canvas, AppError> {
        let mut canvas = Canvas::with_config(self.config.canvas.clone());
        let source = canvas.add_shape();
        let target = canvas.add_shape_at(Point::new(250.0, 120.0));
        for (id, label) in [(source, "Source"), (target, "Target")] {
            canvas.begin_edit(id);
            canvas.commit_edit(label);
        }
        canvas.add_connector(source, target)?;
        Ok(canvas)
    }

    /// Shapes, extent and display list of a canvas.
    pub fn describe(&self, canvas: &Canvas) -> Result<String, AppError> {
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(canvas))?;

        let mut out = String::new();
        let extent = canvas.extent();
        let _ = writeln!(
            out,
            "extent: ({}, {}) - ({}, {})",
            extent.x0, extent.y0, extent.x1, extent.y1
        );
        let _ = writeln!(out, "shapes: {}", canvas.shapes().count());
        for shape in canvas.shapes() {
            let b = shape.bounds();
            let _ = writeln!(
                out,
                "  {:?} at ({}, {}) size {}x{}",
                shape.text(),
                b.x0,
                b.y0,
                b.width(),
                b.height()
            );
        }
        let _ = writeln!(out, "draw commands: {}", renderer.commands().len());
        for command in renderer.commands() {
            let _ = writeln!(out, "  {:?}", command);
        }
        Ok(out)
    }
}
