use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub ocr: OcrConfig,
    pub llm: LlmConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// OCR service configuration. The service speaks the PaddleOCR HTTP
/// protocol: a base64 file payload plus a numeric file-type tag.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub base_url: String,
    pub file_type: u32,
    pub timeout_secs: u64,
}

/// Chat backend configuration. The per-scenario model name lives in the
/// prompt TOML (see `PromptStore`), not here.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Location of the locale/scenario prompt and model table.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:hanzi.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            ocr: OcrConfig {
                base_url: env::var("OCR_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),
                file_type: parse_env_or("OCR_FILE_TYPE", 1),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
            },
            llm: LlmConfig {
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 120),
            },
            prompts: PromptsConfig {
                path: env::var("PROMPTS_PATH")
                    .unwrap_or_else(|_| "config/prompts.toml".to_string()),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
