use std::path::PathBuf;

use crate::{
    document::DEFAULT_MIN_WORDS,
    output::DEFAULT_PREVIEW_CHARS,
    semantic::{self, embeddings::DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_TOP_K},
    storage::{BackendLocal, StorageManager},
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.yaml";

const DEFAULT_INPUT_DIR: &str = "sample_input";
const DEFAULT_OUTPUT_FILE: &str = "sample_output/semantic_results.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid utf8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("config is malformed: {0}")]
    Malformed(#[from] serde_yml::Error),

    #[error("{field} {message}")]
    Invalid { field: &'static str, message: String },
}

/// Embedding provider settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model name for embeddings (e.g., "all-MiniLM-L6-v2")
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for model download in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_download_timeout_secs() -> u64 {
    DEFAULT_DOWNLOAD_TIMEOUT_SECS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Folder scanned for documents
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Where the JSON results are written
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Minimum whitespace-separated tokens for a block to become a unit
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Number of results returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Characters of text shown per result on the console
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Log and skip documents that fail to parse instead of aborting
    #[serde(default)]
    pub skip_unreadable: bool,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_file: default_output_file(),
            min_words: DEFAULT_MIN_WORDS,
            top_k: DEFAULT_TOP_K,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            skip_unreadable: false,
            embedding: EmbeddingConfig::default(),
            base_path: PathBuf::new(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_DIR)
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_min_words() -> usize {
    DEFAULT_MIN_WORDS
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_words == 0 {
            return Err(ConfigError::Invalid {
                field: "min_words",
                message: "must be at least 1".to_string(),
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "top_k",
                message: "must be at least 1".to_string(),
            });
        }

        if self.preview_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "preview_chars",
                message: "must be at least 1".to_string(),
            });
        }

        if let Err(e) = semantic::embeddings::parse_model_name(&self.embedding.model) {
            return Err(ConfigError::Invalid {
                field: "embedding.model",
                message: e.to_string(),
            });
        }

        if self.embedding.download_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "embedding.download_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Load `config.yaml` from `base_path`, writing the defaults first if the
    /// file does not exist yet.
    pub fn load_with(base_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_path = base_path.into();
        let store = BackendLocal::new(&base_path).map_err(|source| ConfigError::Io {
            path: base_path.clone(),
            source,
        })?;
        let io_err = |source| ConfigError::Io {
            path: base_path.join(CONFIG_FILE),
            source,
        };

        if !store.exists(CONFIG_FILE) {
            log::info!("Creating default config at {:?}", base_path.join(CONFIG_FILE));
            store
                .write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())
                .map_err(io_err)?;
        }

        let config_str = String::from_utf8(store.read(CONFIG_FILE).map_err(io_err)?)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path;
        config.validate()?;

        Ok(config)
    }

    /// Directory holding `config.yaml` and the model cache.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}
