use std::{
    io,
    path::{Path, PathBuf},
};

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held exactly this content and was left untouched
    Unchanged,
}

/// Result of a remove operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResult {
    /// File existed and was deleted
    Removed,
    /// Nothing was there to delete
    Missing,
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Consume the file, returning its content
    pub fn into_content(self) -> String {
        self.content
    }

    /// Write the file, skipping the write when the bytes on disk already match.
    pub fn write(&self) -> io::Result<WriteResult> {
        match std::fs::read(&self.path) {
            Ok(existing) if existing == self.content.as_bytes() => Ok(WriteResult::Unchanged),
            Ok(_) => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Err(e) => Err(e),
        }
    }
}

/// Delete `path` if it exists.
pub fn remove_file(path: &Path) -> io::Result<RemoveResult> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(RemoveResult::Removed),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RemoveResult::Missing),
        Err(e) => Err(e),
    }
}
