//! Secret configuration storage backed by `secret.json`.

use std::path::PathBuf;

use async_trait::async_trait;
use solace_core::config::{SecretConfig, SecretService};

use crate::paths::SolacePaths;

/// Loads API keys from the JSON secret file.
pub struct SecretStorage {
    secret_path: PathBuf,
}

impl SecretStorage {
    /// Creates a storage over an explicit secret file path.
    pub fn new(secret_path: impl Into<PathBuf>) -> Self {
        Self {
            secret_path: secret_path.into(),
        }
    }

    /// Creates a storage over the default secret file location, creating
    /// a template file if none exists yet.
    pub fn default_location() -> Result<Self, std::io::Error> {
        let secret_path = SolacePaths::ensure_secret_file()?;
        Ok(Self { secret_path })
    }
}

#[async_trait]
impl SecretService for SecretStorage {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        let content = std::fs::read_to_string(&self.secret_path)
            .map_err(|e| format!("Failed to read secret file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse secret file: {}", e))
    }

    async fn secret_file_exists(&self) -> bool {
        self.secret_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn loads_gemini_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"gemini": {"api_key": "test-key", "model_name": "gemini-2.0-flash"}}"#,
        )
        .unwrap();
        file.flush().unwrap();

        let storage = SecretStorage::new(file.path());
        assert!(storage.secret_file_exists().await);

        let config = storage.load_secrets().await.unwrap();
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key, "test-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.0-flash"));
    }

    #[tokio::test]
    async fn missing_file_reports_error() {
        let storage = SecretStorage::new("/nonexistent/secret.json");
        assert!(!storage.secret_file_exists().await);
        assert!(storage.load_secrets().await.is_err());
    }
}
