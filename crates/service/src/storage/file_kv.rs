use std::{io::ErrorKind, path::{Path, PathBuf}};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;
use super::KvSubstrate;

/// Directory-backed substrate: namespace `x` lives in `<dir>/x.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous collection intact.
#[derive(Clone, Debug)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open the store rooted at `dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::storage(&format!("create {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, namespace: &str) -> Result<PathBuf, ServiceError> {
        let valid = !namespace.is_empty()
            && namespace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ServiceError::Validation(format!("invalid namespace {:?}", namespace)));
        }
        Ok(self.dir.join(format!("{}.json", namespace)))
    }
}

#[async_trait]
impl KvSubstrate for FileKvStore {
    async fn get(&self, namespace: &str) -> Result<Option<String>, ServiceError> {
        let path = self.path_for(namespace)?;
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::storage(&format!("read {}", path.display()), e)),
        }
    }

    async fn set(&self, namespace: &str, value: String) -> Result<(), ServiceError> {
        let path = self.path_for(namespace)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|e| ServiceError::storage(&format!("write {}", tmp.display()), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| ServiceError::storage(&format!("rename into {}", path.display()), e))?;
        debug!(namespace, bytes = value.len(), "namespace written");
        Ok(())
    }

    async fn remove(&self, namespace: &str) -> Result<(), ServiceError> {
        let path = self.path_for(namespace)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::storage(&format!("remove {}", path.display()), e)),
        }
    }
}
