//! Infrastructure layer for Solace.
//!
//! File-backed implementations of the domain's persistence and content
//! traits, plus path and secret management.

pub mod content;
pub mod dto;
pub mod paths;
pub mod secret_storage;
pub mod toml_wellness_repository;

pub use content::TomlContentSource;
pub use paths::{PathError, SolacePaths};
pub use secret_storage::SecretStorage;
pub use toml_wellness_repository::TomlWellnessRepository;
