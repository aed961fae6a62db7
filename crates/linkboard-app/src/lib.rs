//! Linkboard Application
//!
//! A headless shell around the core: it builds, loads and saves canvases
//! and reports what a renderer would draw.

mod app;

pub use app::{App, AppConfig, AppError, CONFIG_ENV, Cli, Command};
