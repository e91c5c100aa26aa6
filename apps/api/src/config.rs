use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;

const DEFAULT_LATEX_COMPILER_URL: &str = "https://latex.ytotech.com/builds/sync";
const DEFAULT_COMPILER_TIMEOUT_SECS: u64 = 20;
const DEFAULT_AI_MAX_TOKENS: u32 = 2048;

/// AI provider used by the coaching features. Injected here rather than
/// read from globals by whichever module needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Deepseek,
    Openai,
}

impl FromStr for AiProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(AiProvider::Deepseek),
            "openai" => Ok(AiProvider::Openai),
            other => bail!("AI_PROVIDER must be 'deepseek' or 'openai', got '{other}'"),
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AiProvider::Deepseek => "deepseek",
            AiProvider::Openai => "openai",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiSettings {
    pub provider: AiProvider,
    pub max_tokens: u32,
}

impl AiSettings {
    fn from_vars(provider: Option<String>, max_tokens: Option<String>) -> Result<Self> {
        let provider = match provider {
            Some(raw) => raw.parse()?,
            None => AiProvider::Deepseek,
        };
        let max_tokens = match max_tokens {
            Some(raw) => raw
                .parse::<u32>()
                .context("AI_MAX_TOKENS must be a positive integer")?,
            None => DEFAULT_AI_MAX_TOKENS,
        };
        if max_tokens == 0 {
            bail!("AI_MAX_TOKENS must be greater than zero");
        }
        Ok(Self {
            provider,
            max_tokens,
        })
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub latex_compiler_url: String,
    pub latex_compiler_timeout: Duration,
    pub ai: AiSettings,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = match optional_env("LATEX_COMPILER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("LATEX_COMPILER_TIMEOUT_SECS must be a number of seconds")?,
            None => DEFAULT_COMPILER_TIMEOUT_SECS,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            latex_compiler_url: optional_env("LATEX_COMPILER_URL")
                .unwrap_or_else(|| DEFAULT_LATEX_COMPILER_URL.to_string()),
            latex_compiler_timeout: Duration::from_secs(timeout_secs),
            ai: AiSettings::from_vars(optional_env("AI_PROVIDER"), optional_env("AI_MAX_TOKENS"))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
