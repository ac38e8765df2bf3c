use atomicwrites::{AtomicFile, OverwriteBehavior};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use texsuggest_core::{Error, Result};

/// Where the override document lives.
///
/// Reads and writes are whole-document and not retried; a failure is
/// returned to the caller as is.
pub trait DocumentStore {
    fn load_document(&self) -> Result<String>;

    fn write_document(&self, text: &str) -> Result<()>;

    /// Human readable location, used in messages
    fn location(&self) -> String;
}

/// Document stored on disk, replaced atomically on write
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load_document(&self) -> Result<String> {
        if !self.path.is_file() {
            return Err(Error::DocumentNotFound(self.location()));
        }
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn write_document(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(text.as_bytes()))
            .map_err(|e| Error::Storage(format!("{}: {}", self.location(), e)))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory document, for embedding hosts and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    text: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
        }
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load_document(&self) -> Result<String> {
        self.text
            .lock()
            .clone()
            .ok_or_else(|| Error::DocumentNotFound(self.location()))
    }

    fn write_document(&self, text: &str) -> Result<()> {
        *self.text.lock() = Some(text.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_missing_document() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("symbols.md"));
        assert!(matches!(store.load_document(), Err(Error::DocumentNotFound(_))));
    }

    #[test]
    fn test_file_store_write_then_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("symbols.md"));

        store.write_document("```note\nhi\n```\n").unwrap();
        assert_eq!(store.load_document().unwrap(), "```note\nhi\n```\n");

        store.write_document("replaced").unwrap();
        assert_eq!(store.load_document().unwrap(), "replaced");
    }

    #[test]
    fn test_file_store_directory_is_not_a_document() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_document(), Err(Error::DocumentNotFound(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(matches!(store.load_document(), Err(Error::DocumentNotFound(_))));

        store.write_document("text").unwrap();
        assert_eq!(store.load_document().unwrap(), "text");
        assert_eq!(MemoryStore::with_text("x").text().as_deref(), Some("x"));
    }
}
