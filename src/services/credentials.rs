use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;

use crate::error::AppError;

const TOKEN_FILE: &str = "token";

/// The one durable piece of client-side state: the current bearer token.
///
/// Written only by the session service; the API client reads it at request
/// time and never writes it back.
#[derive(Debug, Clone)]
pub struct TokenStore {
    root: Arc<PathBuf>,
}

impl TokenStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn token_path(&self) -> PathBuf {
        self.root.join(TOKEN_FILE)
    }

    pub async fn load(&self) -> Result<Option<String>, AppError> {
        let path = self.token_path();
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).await?;
        let token = raw.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    pub async fn save(&self, token: &str) -> Result<(), AppError> {
        fs::create_dir_all(&*self.root).await?;
        fs::write(self.token_path(), token).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        let path = self.token_path();
        if fs::try_exists(&path).await? {
            fs::remove_file(path).await?;
        }
        Ok(())
    }
}
