//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult, apply_document, encode_canvas};
use crate::canvas::Canvas;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Documents are kept in their encoded form, so loading goes through the
/// same validation as a file would.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `name` without validating it.
    pub fn insert_raw(&self, name: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.insert(name.to_string(), json.into());
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, canvas: &Canvas) -> StorageResult<()> {
        let json = encode_canvas(canvas)?;
        self.insert_raw(name, json)?;
        log::info!("saved {} shape(s) to memory as {name}", canvas.shapes().count());
        Ok(())
    }

    fn load(&self, name: &str, canvas: &mut Canvas) -> StorageResult<usize> {
        let json = {
            let docs = self
                .documents
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            docs.get(name)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(name.to_string()))?
        };
        apply_document(name, &json, canvas)
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasError;
    use kurbo::Point;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.add_shape();
        canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let canvas = sample_canvas();

        storage.save("test", &canvas).unwrap();
        let mut loaded = Canvas::new();
        assert_eq!(storage.load("test", &mut loaded).unwrap(), 2);

        let positions: Vec<Point> = loaded.shapes().map(|s| s.position()).collect();
        assert_eq!(positions, vec![Point::ZERO, Point::new(200.0, 0.0)]);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.load("nonexistent", &mut Canvas::new());

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_malformed_document_keeps_canvas() {
        let storage = MemoryStorage::new();
        storage.insert_raw("bad", r#"[{ "type": "DraggableTextItem" }]"#).unwrap();

        let mut canvas = sample_canvas();
        let result = storage.load("bad", &mut canvas);
        assert!(matches!(
            result,
            Err(StorageError::Document(CanvasError::MalformedDocument(_)))
        ));
        assert_eq!(canvas.shapes().count(), 2);
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();

        assert!(!storage.exists("test").unwrap());
        storage.save("test", &Canvas::new()).unwrap();
        assert!(storage.exists("test").unwrap());
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();

        storage.save("test", &Canvas::new()).unwrap();
        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let canvas = Canvas::new();

        storage.save("doc1", &canvas).unwrap();
        storage.save("doc2", &canvas).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }
}
