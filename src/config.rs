use std::{env, time::Duration};

use log::warn;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "TravelPlanner";
const DEFAULT_LLM_PROVIDER: &str = "mock";
const DEFAULT_LLM_MODEL: &str = "qwen-turbo";
const DEFAULT_LLM_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 25;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo: MongoConfig,
    pub identity: IdentityConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Default)]
pub struct MongoConfig {
    pub uri: Option<String>,
    pub database: String,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    pub url: Option<String>,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_LLM_PROVIDER.to_string(),
            api_key: String::new(),
            model: DEFAULT_LLM_MODEL.to_string(),
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// A real provider with a key. Everything else stays on the template planner.
    pub fn is_enabled(&self) -> bool {
        !self.provider.trim().eq_ignore_ascii_case(DEFAULT_LLM_PROVIDER)
            && !self.provider.trim().is_empty()
            && !self.api_key.trim().is_empty()
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_env_or(key: &str, fallback: &str) -> String {
    read_env(key).unwrap_or_else(|| fallback.to_string())
}

fn read_env_warn(key: &str) -> Option<String> {
    let value = read_env(key);
    if value.is_none() {
        warn!("environment variable {} is not set", key);
    }
    value
}

impl AppConfig {
    /// Reads the process environment. Never fails; missing values fall back to
    /// defaults and the affected features report themselves as unconfigured.
    pub fn from_env() -> Self {
        let port = read_env("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(PORT);

        let timeout_secs = read_env("LLM_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        Self {
            host: read_env_or("HOST", HOST),
            port,
            mongo: MongoConfig {
                uri: read_env_warn("MONGODB_URI"),
                database: read_env_or("MONGODB_DATABASE", DEFAULT_DATABASE),
            },
            identity: IdentityConfig {
                url: read_env_warn("IDENTITY_URL"),
                api_key: read_env("IDENTITY_API_KEY").unwrap_or_default(),
            },
            llm: LlmConfig {
                provider: read_env_or("LLM_PROVIDER", DEFAULT_LLM_PROVIDER),
                api_key: read_env("LLM_API_KEY").unwrap_or_default(),
                model: read_env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                endpoint: read_env_or("LLM_API_BASE_URL", DEFAULT_LLM_ENDPOINT),
                timeout: Duration::from_secs(timeout_secs),
            },
        }
    }
}
