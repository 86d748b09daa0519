use serde::Deserialize;

use crate::application::dashboard_store::DEFAULT_STORE_KEY;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub execution: ExecutionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_store_path")]
    pub path: String,
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            key: default_store_key(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExecutionSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_store_path() -> String {
    "data/local_storage.json".to_string()
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Loads `config/dashboards.{toml,yaml,json}` if present, overridden by
/// `DASHBOARDS__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboards").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARDS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = from_toml("");

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.key, "dashboards");
        assert_eq!(config.execution.timeout_secs, 30);
        assert!(config.execution.token.is_none());
    }

    #[test]
    fn test_reads_sections() {
        let config = from_toml(
            r#"
            [store]
            backend = "memory"
            key = "boards"

            [execution]
            base_url = "https://walkoff.local"
            token = "secret"
            "#,
        );

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.key, "boards");
        assert_eq!(config.store.path, "data/local_storage.json");
        assert_eq!(config.execution.base_url, "https://walkoff.local");
        assert_eq!(config.execution.token.as_deref(), Some("secret"));
    }
}
