use crate::{
    config::Config,
    semantic::{EmbeddingError, EmbeddingModel, EmbeddingProvider},
};
use anyhow::{Context, Result};
use homedir::my_home;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builds the configuration and collaborators a command needs
pub struct AppFactory;

impl AppFactory {
    /// Base directory for `config.yaml` and the model cache.
    ///
    /// `DOCSIFT_BASE_PATH` wins, otherwise `~/.local/share/docsift`.
    pub fn get_base_path() -> Result<PathBuf> {
        if let Ok(base_path) = std::env::var("DOCSIFT_BASE_PATH") {
            return Ok(PathBuf::from(base_path));
        }

        let home = my_home()
            .context("Could not determine home directory")?
            .context("Home directory path is empty")?;
        Ok(home.join(".local/share/docsift"))
    }

    /// Load and validate `config.yaml` under `base_path`.
    pub fn create_config(base_path: &Path) -> Result<Config> {
        std::fs::create_dir_all(base_path)
            .context("Failed to create application base directory")?;
        Config::load_with(base_path)
            .with_context(|| format!("Failed to load config from {}", base_path.display()))
    }

    /// Load the configured embedding model, caching it under the base path.
    pub fn create_provider(config: &Config) -> Result<Box<dyn EmbeddingProvider>, EmbeddingError> {
        let timeout = Duration::from_secs(config.embedding.download_timeout_secs);
        let model = EmbeddingModel::new(
            &config.embedding.model,
            config.base_path().clone(),
            Some(timeout),
        )?;
        log::info!(
            "embedding model '{}' ready ({} dimensions)",
            model.name(),
            model.dimensions()
        );
        Ok(Box::new(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_config_makes_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("fresh/base");

        let config = AppFactory::create_config(&base).unwrap();
        assert!(base.join("config.yaml").is_file());
        assert_eq!(config.base_path(), &base);
    }

    #[test]
    fn test_create_provider_rejects_unknown_model() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppFactory::create_config(tmp.path()).unwrap();
        config.embedding.model = "unknown".to_string();

        let result = AppFactory::create_provider(&config);
        assert!(matches!(result, Err(EmbeddingError::InvalidModel(_))));
    }
}
