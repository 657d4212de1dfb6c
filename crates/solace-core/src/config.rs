//! Secret configuration types.

use serde::{Deserialize, Serialize};

/// API keys and per-backend settings, stored in `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    /// Gemini API configuration, if set up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini backend configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Gemini REST API.
    pub api_key: String,
    /// Model name override; the client default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that secret files have appropriate
/// permissions and that secrets never appear in error messages or logs.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig, String>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
