//! Storage abstraction for persistence.

pub mod codec;
mod file;
mod memory;

pub use codec::ShapeRecord;
pub use file::{FileStorage, load_from_path, save_to_path};
pub use memory::MemoryStorage;

use crate::canvas::{Canvas, CanvasError};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    Document(#[from] CanvasError),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
///
/// Documents are addressed by name. Loading replaces the canvas content
/// only if the stored document is valid.
pub trait Storage: Send + Sync {
    /// Save the canvas shapes under `name`.
    fn save(&self, name: &str, canvas: &Canvas) -> StorageResult<()>;

    /// Load `name` into `canvas`, returning the number of shapes read.
    fn load(&self, name: &str, canvas: &mut Canvas) -> StorageResult<usize>;

    /// Delete a document.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List all document names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}

/// Serialize a canvas for a backend.
fn encode_canvas(canvas: &Canvas) -> StorageResult<String> {
    canvas
        .serialize()
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Apply stored JSON to a canvas, logging the outcome.
fn apply_document(name: &str, json: &str, canvas: &mut Canvas) -> StorageResult<usize> {
    match canvas.deserialize(json) {
        Ok(count) => {
            log::info!("loaded {count} shape(s) from {name}");
            Ok(count)
        }
        Err(err) => {
            log::warn!("failed to load {name}: {err}");
            Err(err.into())
        }
    }
}
