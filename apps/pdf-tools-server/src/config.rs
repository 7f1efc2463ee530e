//! Configuration management for the PDF Tools server

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub summary: SummaryConfig,
    pub diff: DiffConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum request body size in megabytes
    pub max_upload_mb: usize,
    /// Allow cross-origin requests from any origin
    pub cors_allow_any: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    pub max_sentences: usize,
    pub fallback_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    pub context_lines: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_upload_mb: 100,
                cors_allow_any: true,
            },
            summary: SummaryConfig {
                max_sentences: 3,
                fallback_chars: 1000,
            },
            diff: DiffConfig { context_lines: 3 },
        }
    }
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source; unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "SERVER_PORT", defaults.server.port)?,
                max_upload_mb: parse_var(&lookup, "MAX_UPLOAD_MB", defaults.server.max_upload_mb)?,
                cors_allow_any: parse_var(&lookup, "CORS_ALLOW_ANY", defaults.server.cors_allow_any)?,
            },
            summary: SummaryConfig {
                max_sentences: parse_var(
                    &lookup,
                    "SUMMARY_MAX_SENTENCES",
                    defaults.summary.max_sentences,
                )?,
                fallback_chars: parse_var(
                    &lookup,
                    "SUMMARY_FALLBACK_CHARS",
                    defaults.summary.fallback_chars,
                )?,
            },
            diff: DiffConfig {
                context_lines: parse_var(&lookup, "DIFF_CONTEXT_LINES", defaults.diff.context_lines)?,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
