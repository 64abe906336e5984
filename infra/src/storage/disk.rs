//! Object store backed by a directory on the local filesystem.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use tg_core::{DomainError, ObjectStore};

use crate::InfrastructureError;

/// Stores each object as one file named after its key
#[derive(Debug, Clone)]
pub struct DiskObjectStore {
    root: PathBuf,
}

impl DiskObjectStore {
    /// Open (creating if needed) a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        tracing::info!(root = %root.display(), "Disk object store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys are flat file names; anything that could address another path is rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_');
        if !valid {
            return Err(DomainError::validation(format!("Invalid object key: {}", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStore for DiskObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::from(InfrastructureError::Io(e)))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InfrastructureError::Io(e).into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(InfrastructureError::Io(e).into()),
        }
    }
}
