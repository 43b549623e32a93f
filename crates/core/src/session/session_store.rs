//! File-backed token store.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use super::session_traits::TokenStoreTrait;
use crate::errors::{Error, Result};

/// Persists the session token as a single file.
///
/// A missing or empty file means "logged out"; no other interpretation is
/// attached to the contents.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TokenStoreTrait for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::TokenStore(format!(
                "failed to read {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                Error::TokenStore(format!("failed to create {}: {}", parent.display(), err))
            })?;
        }
        tokio::fs::write(&self.path, token).await.map_err(|err| {
            Error::TokenStore(format!("failed to write {}: {}", self.path.display(), err))
        })?;
        debug!("Session token saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::TokenStore(format!(
                "failed to remove {}: {}",
                self.path.display(),
                err
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));
        assert_eq!(store.load().await.unwrap(), None);

        store.save("sekrit").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("sekrit"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        tokio::fs::write(&path, "  \n").await.unwrap();
        let store = FileTokenStore::new(path);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.clear().await.unwrap();
        store.clear().await.unwrap();
    }
}
