use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_seed_path")]
    pub path: PathBuf,
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
    #[serde(default = "default_seed_title")]
    pub title: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: default_seed_path(),
            chunk_chars: default_chunk_chars(),
            title: default_seed_title(),
        }
    }
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("./policy.txt")
}
fn default_chunk_chars() -> usize {
    400
}
fn default_seed_title() -> String {
    "policy".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub default_top_k: i64,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: i64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
        }
    }
}

fn default_top_k() -> i64 {
    3
}
fn default_max_top_k() -> i64 {
    25
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate seeding
    if config.seed.chunk_chars == 0 {
        anyhow::bail!("seed.chunk_chars must be > 0");
    }

    // Validate retrieval
    if config.retrieval.max_top_k < 1 {
        anyhow::bail!("retrieval.max_top_k must be >= 1");
    }

    if config.retrieval.default_top_k < 0
        || config.retrieval.default_top_k > config.retrieval.max_top_k
    {
        anyhow::bail!(
            "retrieval.default_top_k must be in [0, {}]",
            config.retrieval.max_top_k
        );
    }

    // Validate provider
    if config.provider.timeout_secs == 0 {
        anyhow::bail!("provider.timeout_secs must be > 0");
    }

    if config.provider.model.trim().is_empty() {
        anyhow::bail!("provider.model must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_applies_defaults() {
        let file = write_config(
            r#"
[db]
path = "./data/chat.sqlite"

[server]
bind = "127.0.0.1:8000"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.seed.chunk_chars, 400);
        assert_eq!(config.seed.title, "policy");
        assert_eq!(config.retrieval.default_top_k, 3);
        assert_eq!(config.retrieval.max_top_k, 25);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.provider.timeout_secs, 30);
    }

    #[test]
    fn test_rejects_zero_chunk_chars() {
        let file = write_config(
            r#"
[db]
path = "./data/chat.sqlite"

[seed]
chunk_chars = 0

[server]
bind = "127.0.0.1:8000"
"#,
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_default_top_k_above_max() {
        let file = write_config(
            r#"
[db]
path = "./data/chat.sqlite"

[retrieval]
default_top_k = 50
max_top_k = 25

[server]
bind = "127.0.0.1:8000"
"#,
        );
        assert!(load_config(file.path()).is_err());
    }
}
