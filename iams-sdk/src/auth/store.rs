use std::path::{Path, PathBuf};

use crate::{auth::types::TokenPair, error::IamsError};

/// JSON file holding the current token pair, shared by every scenario of a run
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the pair, creating parent directories as needed
    pub async fn save(&self, pair: &TokenPair) -> Result<(), IamsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| IamsError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string(pair)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| IamsError::io(&self.path, e))?;

        tracing::debug!("Saved token pair to {}", self.path.display());
        Ok(())
    }

    /// Read the pair back; a missing or empty access token is an error
    pub async fn load(&self) -> Result<TokenPair, IamsError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| IamsError::io(&self.path, e))?;

        let pair: TokenPair = serde_json::from_str(&content)?;
        if pair.access_token.is_empty() {
            return Err(IamsError::authentication(format!(
                "Access token not found in {}",
                self.path.display()
            )));
        }

        Ok(pair)
    }

    /// Convenience for callers that only need the bearer token
    pub async fn access_token(&self) -> Result<String, IamsError> {
        Ok(self.load().await?.access_token)
    }
}
