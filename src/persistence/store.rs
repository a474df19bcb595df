// src/persistence/store.rs
//
// Durable-storage collaborator interface. The platform owns the actual
// storage root (picked through its own chooser flow); the core only
// needs these narrow primitives plus relative-to-absolute path mapping
// for handing download/thumbnail paths to the player layer.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreInfo {
    pub exists: bool,
    pub is_directory: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn read_file(&self, uri: &str) -> AppResult<String>;

    async fn write_file(&self, uri: &str, contents: &str) -> AppResult<()>;

    /// Deleting a nonexistent file succeeds.
    async fn delete_file(&self, uri: &str) -> AppResult<()>;

    async fn get_info(&self, uri: &str) -> AppResult<StoreInfo>;

    /// Map a stored relative path (video part, thumbnail) to an absolute
    /// URI loadable by the platform.
    fn path(&self, relative: &str) -> String;
}

/// Filesystem-backed store rooted at a user-chosen directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl Store for FsStore {
    async fn read_file(&self, uri: &str) -> AppResult<String> {
        Ok(tokio::fs::read_to_string(uri).await?)
    }

    async fn write_file(&self, uri: &str, contents: &str) -> AppResult<()> {
        Ok(tokio::fs::write(uri, contents).await?)
    }

    async fn delete_file(&self, uri: &str) -> AppResult<()> {
        match tokio::fs::remove_file(uri).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_info(&self, uri: &str) -> AppResult<StoreInfo> {
        match tokio::fs::metadata(uri).await {
            Ok(metadata) => Ok(StoreInfo {
                exists: true,
                is_directory: metadata.is_dir(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreInfo {
                exists: false,
                is_directory: false,
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn path(&self, relative: &str) -> String {
        self.root.join(relative).to_string_lossy().into_owned()
    }
}

/// In-memory store, used by tests and useful as a scratch backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: std::sync::Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self, uri: &str) -> Option<String> {
        self.files.lock().unwrap().get(uri).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn read_file(&self, uri: &str) -> AppResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| AppError::Persistence(format!("no such file: {}", uri)))
    }

    async fn write_file(&self, uri: &str, contents: &str) -> AppResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(uri.to_string(), contents.to_string());
        Ok(())
    }

    async fn delete_file(&self, uri: &str) -> AppResult<()> {
        self.files.lock().unwrap().remove(uri);
        Ok(())
    }

    async fn get_info(&self, uri: &str) -> AppResult<StoreInfo> {
        if uri.is_empty() {
            // The root itself behaves like a directory.
            return Ok(StoreInfo {
                exists: true,
                is_directory: true,
            });
        }
        Ok(StoreInfo {
            exists: self.files.lock().unwrap().contains_key(uri),
            is_directory: false,
        })
    }

    fn path(&self, relative: &str) -> String {
        relative.to_string()
    }
}
