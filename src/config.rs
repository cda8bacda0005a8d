use std::time::Duration;
use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PORT: u16 = 5180;
const DEFAULT_LOG_PATH: &str = "./requests.log";

/// Settings read once at startup. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub port: u16,
    pub log_path: String
}

impl Config {

    pub fn from_env() -> Result<Self, ConfigError> {

        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())

    }

    // split out so tests don't have to touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = lookup("LLM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = lookup("LLM_MODEL")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>()
                .map_err(|_| ConfigError::Invalid { name: "LLM_TIMEOUT_SECS", value: raw })?,
            None => DEFAULT_TIMEOUT_SECS
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value: raw })?,
            None => DEFAULT_PORT
        };

        let log_path = lookup("LOG_PATH")
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());

        Ok(Config {
            api_key,
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
            port,
            log_path
        })

    }

    pub fn completions_url(&self) -> String {

        format!("{}/chat/completions", self.base_url)

    }

}
