//! Runtime settings.
//!
//! Settings come from an optional `config.yml` next to the binary (or at
//! `RAGENT_CONFIG_PATH`), with every field overridable through environment
//! variables. The embedding model named here must match the one used when the
//! corpus was seeded; mixing models makes similarity scores meaningless.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::errors::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub pinecone_api_key: String,
    pub pinecone_index_host: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub chunk_max_chars: usize,
    pub top_k: usize,
    pub docs_dir: PathBuf,
    pub port: u16,
    pub log_dir: PathBuf,
    pub weather_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com".to_string(),
            pinecone_api_key: String::new(),
            pinecone_index_host: String::new(),
            chat_model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chunk_max_chars: 500,
            top_k: 3,
            docs_dir: PathBuf::from("./docs"),
            port: 3001,
            log_dir: PathBuf::from("./logs"),
            weather_base_url: "https://api.open-meteo.com".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the config file (if present) and apply environment
    /// overrides on top.
    pub fn load() -> Result<Self, ApiError> {
        let path = config_path();
        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let raw = fs::read_to_string(path).map_err(ApiError::internal)?;
        serde_yaml::from_str(&raw)
            .map_err(|e| ApiError::Internal(format!("invalid config {}: {}", path.display(), e)))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("OPENAI_API_KEY") {
            self.openai_api_key = v;
        }
        if let Ok(v) = env::var("OPENAI_BASE_URL") {
            self.openai_base_url = v;
        }
        if let Ok(v) = env::var("PINECONE_API_KEY") {
            self.pinecone_api_key = v;
        }
        if let Ok(v) = env::var("PINECONE_INDEX_HOST") {
            self.pinecone_index_host = v;
        }
        if let Ok(v) = env::var("WEATHER_BASE_URL") {
            self.weather_base_url = v;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            self.port = port;
        }
    }

    /// Outbound model calls cannot work without a key; fail startup early.
    pub fn require_openai_key(&self) -> Result<(), ApiError> {
        if self.openai_api_key.trim().is_empty() {
            return Err(ApiError::Internal(
                "OPENAI_API_KEY is not configured".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = env::var("RAGENT_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from("config.yml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_served_corpus() {
        let settings = Settings::default();
        assert_eq!(settings.chat_model, "gpt-4o-mini");
        assert_eq!(settings.embedding_model, "text-embedding-3-small");
        assert_eq!(settings.chunk_max_chars, 500);
        assert_eq!(settings.top_k, 3);
        assert_eq!(settings.port, 3001);
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chat_model: gpt-4o\ntop_k: 5").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.chat_model, "gpt-4o");
        assert_eq!(settings.top_k, 5);
        assert_eq!(settings.chunk_max_chars, 500);
    }

    #[test]
    fn missing_openai_key_is_rejected() {
        let settings = Settings::default();
        assert!(settings.require_openai_key().is_err());
    }
}
