pub mod utils;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::GenerationParams;
use utils::{load_text_file_with_guess_encoding, substitute_env_vars};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LLMConfig,
    #[serde(default)]
    pub translation_config: TranslationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Configuration for the generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// "openai_compatible_llm", "ollama_llm" or "llama_cpp_llm"
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub llm_api_key: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub generation: GenerationParams,
}

fn default_llm_provider() -> String {
    "openai_compatible_llm".to_string()
}

fn default_model() -> String {
    "Babel-9B-Chat".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            model: default_model(),
            base_url: default_base_url(),
            llm_api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            generation: GenerationParams::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Extra generation attempts after an unrecoverable model output.
    /// Zero keeps the single-shot behaviour.
    #[serde(default)]
    pub recovery_retries: u32,
}

impl Config {
    /// Load configuration from a JSON (`.json`, `.jsonld`) or YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = load_text_file_with_guess_encoding(path)?;
        let content = substitute_env_vars(&content);

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let config: Config = match extension.as_str() {
            "json" | "jsonld" => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Candidate config locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        let mut paths: Vec<PathBuf> = std::env::var("CONFIG_PATH").ok().map(PathBuf::from).into_iter().collect();
        paths.push(PathBuf::from("conf.yaml"));
        paths.push(PathBuf::from("conf.json"));
        if let Some(dir) = exe_dir {
            paths.push(dir.join("conf.yaml"));
            paths.push(dir.join("conf.json"));
        }
        paths
    }

    /// Load the first config found among `paths`
    pub fn load_first(paths: &[PathBuf]) -> Result<(Self, PathBuf)> {
        for path in paths {
            match Config::load(path) {
                Ok(cfg) => return Ok((cfg, path.clone())),
                Err(e) => {
                    debug!("Failed to load config from {}: {}", path.display(), e);
                    continue;
                }
            }
        }

        Err(anyhow::anyhow!("Could not find config file. Tried: {:?}", paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_with_defaults() {
        let file = write_config(
            ".yaml",
            "llm_config:\n  llm_provider: ollama_llm\n  model: qwen2.5:7b\n  base_url: http://localhost:11434\n",
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.system_config.port, 9000);
        assert_eq!(config.llm_config.llm_provider, "ollama_llm");
        assert_eq!(config.llm_config.model, "qwen2.5:7b");
        assert_eq!(config.llm_config.generation, GenerationParams::default());
        assert_eq!(config.translation_config.recovery_retries, 0);
    }

    #[test]
    fn loads_json_by_extension() {
        let file = write_config(
            ".json",
            r#"{"system_config": {"host": "127.0.0.1", "port": 9100},
                "llm_config": {"generation": {"max_tokens": 256, "temperature": 0.2, "stop": ["<|im_end|>"]}},
                "translation_config": {"recovery_retries": 1}}"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.system_config.host, "127.0.0.1");
        assert_eq!(config.system_config.port, 9100);
        assert_eq!(config.llm_config.generation.max_tokens, 256);
        assert_eq!(config.llm_config.generation.stop, vec!["<|im_end|>".to_string()]);
        assert_eq!(config.translation_config.recovery_retries, 1);
    }

    #[test]
    fn load_first_skips_missing_files() {
        let file = write_config(".yaml", "system_config:\n  port: 9200\n");
        let paths = vec![PathBuf::from("/nonexistent/conf.yaml"), file.path().to_path_buf()];

        let (config, loaded) = Config::load_first(&paths).unwrap();
        assert_eq!(config.system_config.port, 9200);
        assert_eq!(loaded.as_path(), file.path());
    }

    #[test]
    fn load_first_reports_every_path_tried() {
        let paths = vec![PathBuf::from("/nonexistent/a.yaml"), PathBuf::from("/nonexistent/b.json")];
        let err = Config::load_first(&paths).unwrap_err().to_string();
        assert!(err.contains("a.yaml") && err.contains("b.json"));
    }
}
