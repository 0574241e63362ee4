use crate::config::app_dir;
use crate::error::AppError;
use crate::storage::KeyValueStore;
use std::path::{Path, PathBuf};

const STORE_ENV_VAR: &str = "TASKLIST_STORE_PATH";

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// `TASKLIST_STORE_PATH` when set, otherwise the per-user app directory.
pub fn store_root() -> Result<PathBuf, AppError> {
    match std::env::var(STORE_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => app_dir(),
    }
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(store_root()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(AppError::invalid_data(format!("invalid store key '{key}'")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
        }

        // Renamed into place so a crash mid-write leaves the previous snapshot.
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, blob).map_err(|err| AppError::io(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&staging, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        std::fs::rename(&staging, &path).map_err(|err| AppError::io(err.to_string()))?;
        log::debug!("wrote {} bytes to {}", blob.len(), path.display());

        Ok(())
    }
}
