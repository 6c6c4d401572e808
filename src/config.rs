use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;

/// Built-in defaults, so the binary starts without a config directory.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for the whole multipart body, in MiB.
    pub max_upload_mb: usize,
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        base_builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn base_builder() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_with_env(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        base_builder()
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .source(Some(map)),
            )
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_default_config_loads() {
        let config = load_with_env(&[]);
        assert!(config.is_ok(), "Default config should load: {config:?}");

        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_upload_bytes(), 10 * 1024 * 1024);
        assert!(config.llm.api_key.is_empty());
    }

    #[test]
    fn test_env_override() {
        let config = load_with_env(&[
            ("APP__SERVER__PORT", "8080"),
            ("APP__LLM__PROVIDER", "openai"),
            ("APP__LLM__API_KEY", "sk-test"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.model, "gemini-2.0-flash");
    }
}
