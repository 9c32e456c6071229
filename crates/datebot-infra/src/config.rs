//! Configuration loader for datebot.
//!
//! Reads `config.toml` from the config directory (`~/.config/datebot/` on
//! Linux) and deserializes it into [`BotConfig`], falling back to defaults
//! when the file is missing or malformed. Environment variables (including
//! those loaded from `.env`) override file values; the gateway token only
//! ever comes from the environment.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use datebot_types::config::BotConfig;
use datebot_types::error::ConfigError;

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const CHANNEL_VAR: &str = "CHANNEL_ID";
pub const ROLE_VAR: &str = "DELETE_ROLE_ID";
pub const TIME_ZONE_VAR: &str = "DATEBOT_TIME_ZONE";
pub const NUDGE_DELAY_VAR: &str = "DATEBOT_NUDGE_DELAY_SECS";

/// Environment variable naming the config file; read by the CLI.
pub const CONFIG_PATH_VAR: &str = "DATEBOT_CONFIG";

/// Default config file path when none is given: `{config_dir}/datebot/config.toml`,
/// or `./config.toml` when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("datebot").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

/// Load `.env` from the working directory (or a parent), if present.
///
/// Runs before tracing is initialized, so the outcome is returned for the
/// caller to log: `Ok(None)` when there is no `.env`.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    dotenv_outcome(dotenvy::dotenv())
}

fn dotenv_outcome(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`BotConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config_file(path: &Path) -> BotConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return BotConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return BotConfig::default();
        }
    };

    match toml::from_str::<BotConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            BotConfig::default()
        }
    }
}

/// Apply environment overrides on top of a file-loaded config.
///
/// `lookup` abstracts `std::env::var` so tests need not mutate the process
/// environment. Empty values count as unset.
pub fn apply_env_overrides<F>(mut config: BotConfig, lookup: F) -> Result<BotConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(value) = var(CHANNEL_VAR) {
        config.channel_id = Some(value.parse().map_err(|_| ConfigError::Invalid {
            key: CHANNEL_VAR,
            value,
        })?);
    }
    if let Some(value) = var(ROLE_VAR) {
        config.role_id = Some(value.parse().map_err(|_| ConfigError::Invalid {
            key: ROLE_VAR,
            value,
        })?);
    }
    if let Some(value) = var(TIME_ZONE_VAR) {
        config.time_zone = value.trim().to_string();
    }
    if let Some(value) = var(NUDGE_DELAY_VAR) {
        config.nudge_delay_secs = value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: NUDGE_DELAY_VAR,
            value,
        })?;
    }

    validate(&config)?;
    Ok(config)
}

/// Snowflakes are never zero; a zero id is a placeholder left in a template.
fn validate(config: &BotConfig) -> Result<(), ConfigError> {
    if config.channel_id.is_some_and(|id| id.get() == 0) {
        return Err(ConfigError::Invalid {
            key: CHANNEL_VAR,
            value: "0".to_string(),
        });
    }
    if config.role_id.is_some_and(|id| id.get() == 0) {
        return Err(ConfigError::Invalid {
            key: ROLE_VAR,
            value: "0".to_string(),
        });
    }
    Ok(())
}

/// Full resolution: file, then process environment.
pub async fn load_config(path: &Path) -> Result<BotConfig, ConfigError> {
    let config = load_config_file(path).await;
    let config = apply_env_overrides(config, |key| std::env::var(key).ok())?;

    if config.channel_id.is_none() {
        tracing::warn!("{CHANNEL_VAR} not set, channel guard disabled");
    }
    if config.role_id.is_none() {
        tracing::warn!("{ROLE_VAR} not set, role removal disabled");
    }

    Ok(config)
}

/// Read the gateway token.
pub fn load_token<F>(lookup: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(TOKEN_VAR)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
        .ok_or(ConfigError::Missing(TOKEN_VAR))
}
