//! Single-slot token cache on disk.
//!
//! The whole credential is written on every change; there is no versioning.
//! On Unix the file is created `0600`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::credential::Credential;
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached credential.
    ///
    /// Returns `Ok(None)` when the file does not exist or is blank.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the file exists but cannot be
    /// read or does not hold a credential.
    pub fn load(&self) -> Result<Option<Credential>, AuthError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AuthError::TokenStoreError(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AuthError::TokenStoreError(format!("parse {}: {e}", self.path.display())))
    }

    /// Overwrite the cache with `credential`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the parent directory cannot be
    /// created or the file cannot be written.
    pub fn store(&self, credential: &Credential) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        }

        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize credential: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)) {
                tracing::warn!("failed to chmod 0600 {}: {e}", self.path.display());
            }
        }

        tracing::debug!(path = %self.path.display(), "token cache written");
        Ok(())
    }
}
