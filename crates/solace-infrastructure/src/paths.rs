//! Unified path management for Solace configuration and data files.
//!
//! Configuration (secrets, content packs) lives under the platform config
//! directory; user records and audio artifacts live under the platform
//! data directory. This keeps behavior consistent across Linux, macOS,
//! and Windows.

use std::path::PathBuf;

use solace_core::config::{GeminiConfig, SecretConfig};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Solace.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/solace/            # Config directory
/// ├── secret.json              # API keys
/// ├── daily_tips.toml          # Daily tip pack
/// └── resources.toml           # Per-emotion exercises and links
///
/// ~/.local/share/solace/       # Data directory
/// ├── users/                   # One TOML record per user
/// └── audio_cache/             # Synthesized audio artifacts
/// ```
pub struct SolacePaths;

impl SolacePaths {
    /// Returns the Solace configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("solace"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the Solace data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("solace"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the daily tip pack.
    pub fn tips_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("daily_tips.toml"))
    }

    /// Returns the path to the per-emotion resource pack.
    pub fn resources_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("resources.toml"))
    }

    /// Returns the path to the user records directory.
    pub fn users_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("users"))
    }

    /// Returns the path to the audio artifact cache directory.
    pub fn audio_cache_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("audio_cache"))
    }

    /// Ensures the secret file exists, creating it with a template if it
    /// doesn't.
    ///
    /// The template contains an empty Gemini API key and the default model
    /// name. On Unix the file is created with 600 permissions.
    pub fn ensure_secret_file() -> Result<PathBuf, std::io::Error> {
        let secret_path = Self::secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some("gemini-2.0-flash".to_string()),
            }),
        };

        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}
