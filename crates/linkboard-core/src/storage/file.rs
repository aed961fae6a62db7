//! File-based storage.

use super::{Storage, StorageError, StorageResult, apply_document, encode_canvas};
use crate::canvas::Canvas;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the canvas shapes to `path` as JSON.
pub fn save_to_path(canvas: &Canvas, path: impl AsRef<Path>) -> StorageResult<()> {
    let path = path.as_ref();
    let json = encode_canvas(canvas)?;
    fs::write(path, json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!(
        "saved {} shape(s) to {}",
        canvas.shapes().count(),
        path.display()
    );
    Ok(())
}

/// Replace the canvas content with the document at `path`.
///
/// On any failure the canvas is left as it was.
pub fn load_from_path(canvas: &mut Canvas, path: impl AsRef<Path>) -> StorageResult<usize> {
    let path = path.as_ref();
    if !path.exists() {
        log::warn!("no document at {}", path.display());
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    apply_document(&path.display().to_string(), &json, canvas)
}

/// Stores documents as `<name>.json` files in one directory.
pub struct FileStorage {
    /// Base directory for document storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Get the file path for a document name.
    fn document_path(&self, name: &str) -> PathBuf {
        // Sanitize name to be safe for filenames
        let safe_name: String = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_name))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, name: &str, canvas: &Canvas) -> StorageResult<()> {
        save_to_path(canvas, self.document_path(name))
    }

    fn load(&self, name: &str, canvas: &mut Canvas) -> StorageResult<usize> {
        let path = self.document_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        load_from_path(canvas, path)
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.document_path(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.document_path(name).exists())
    }
}
