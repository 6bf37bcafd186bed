//! Configuration management for PdfShelf Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body (uploads), in bytes
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Flat directory of `{doc_id}.pdf` files
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Render scale for previews; kept well below 1.0 to keep payloads small
    pub scale: f32,
    pub enabled: bool,
}

/// Errors raised while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 256 * 1024 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            dir: PathBuf::from("./storage"),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            scale: 0.6,
            enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup (the environment in
    /// production, a map in tests). Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let max_upload_mb: usize = parse_or(
            &lookup,
            "MAX_UPLOAD_MB",
            defaults.server.max_upload_bytes / (1024 * 1024),
        )?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "MAX_UPLOAD_MB",
                value: max_upload_mb.to_string(),
            })?;

        let scale: f32 = parse_or(&lookup, "PREVIEW_SCALE", defaults.preview.scale)?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "PREVIEW_SCALE",
                value: scale.to_string(),
            });
        }

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or(&lookup, "SERVER_PORT", defaults.server.port)?,
                max_upload_bytes,
            },
            storage: StorageConfig {
                dir: lookup("STORAGE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.dir),
            },
            preview: PreviewConfig {
                scale,
                enabled: match lookup("PREVIEWS_ENABLED") {
                    Some(value) => parse_bool("PREVIEWS_ENABLED", &value)?,
                    None => defaults.preview.enabled,
                },
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
