use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use habit_hero_domain::session::{AuthToken, TokenStore};
use habit_hero_domain::DomainError;
use log::debug;

pub const TOKEN_FILE_NAME: &str = "auth_token";

/// Bearer token kept in a plain file under the app config directory
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/<app_dir>/auth_token`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TOKEN_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthToken>, DomainError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => AuthToken::new(&contents).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Repository(format!(
                "Failed to read token file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, token: &AuthToken) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::Repository(format!(
                    "Failed to create token directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(&self.path, token.as_str()).map_err(|e| {
            DomainError::Repository(format!(
                "Failed to write token file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("[auth] token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Repository(format!(
                "Failed to remove token file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
