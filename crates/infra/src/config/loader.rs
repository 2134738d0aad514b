//! Configuration loader
//!
//! Loads [`CacheSettings`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If any `CLAVIS_*` variable is set, settings come from the environment
//! 2. Otherwise the loader probes for a config file
//! 3. With neither present, the built-in defaults apply
//! 4. Every path validates the result with [`CacheSettings::ensure`]
//!
//! ## Environment Variables
//! - `CLAVIS_CACHE_ENABLED`: Whether response caching is enabled (true/false)
//! - `CLAVIS_CLUSTER_CONTEXT_ENABLED`: Whether keys are scoped per cluster
//! - `CLAVIS_TOKEN_EXCHANGE_ENDPOINT`: Token exchange URL
//! - `CLAVIS_CACHE_SIZE`: Maximum number of context cache entries
//! - `CLAVIS_CACHE_TTL_SECONDS`: Context cache entry lifetime in seconds
//! - `CLAVIS_CACHE_REFRESH_DEBOUNCE_SECONDS`: Minimum seconds between
//!   background refreshes of one entry
//!
//! ## File Locations
//! The loader probes the following paths (in order), in the current working
//! directory and then next to the executable:
//! 1. `clavis.toml`
//! 2. `clavis.json`
//! 3. `config.toml`
//! 4. `config.json`

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clavis_domain::{CacheSettings, ClavisError, Result};

const ENV_CACHE_ENABLED: &str = "CLAVIS_CACHE_ENABLED";
const ENV_CLUSTER_CONTEXT_ENABLED: &str = "CLAVIS_CLUSTER_CONTEXT_ENABLED";
const ENV_TOKEN_EXCHANGE_ENDPOINT: &str = "CLAVIS_TOKEN_EXCHANGE_ENDPOINT";
const ENV_CACHE_SIZE: &str = "CLAVIS_CACHE_SIZE";
const ENV_CACHE_TTL_SECONDS: &str = "CLAVIS_CACHE_TTL_SECONDS";
const ENV_CACHE_REFRESH_DEBOUNCE_SECONDS: &str = "CLAVIS_CACHE_REFRESH_DEBOUNCE_SECONDS";

const ENV_VARS: [&str; 6] = [
    ENV_CACHE_ENABLED,
    ENV_CLUSTER_CONTEXT_ENABLED,
    ENV_TOKEN_EXCHANGE_ENDPOINT,
    ENV_CACHE_SIZE,
    ENV_CACHE_TTL_SECONDS,
    ENV_CACHE_REFRESH_DEBOUNCE_SECONDS,
];

const CONFIG_FILE_NAMES: [&str; 4] = ["clavis.toml", "clavis.json", "config.toml", "config.json"];

/// Load settings with automatic fallback strategy
///
/// # Errors
/// Returns `ClavisError::Config` if a value cannot be parsed, a config file
/// is malformed, or the resulting settings fail validation.
pub fn load() -> Result<CacheSettings> {
    if ENV_VARS.iter().any(|key| std::env::var_os(key).is_some()) {
        let settings = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(settings);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No configuration found, using defaults");
            let settings = CacheSettings::default();
            settings.ensure()?;
            Ok(settings)
        }
    }
}

/// Load settings from environment variables
///
/// Unset variables keep their defaults.
///
/// # Errors
/// Returns `ClavisError::Config` if a variable has an invalid value or the
/// settings are inconsistent.
pub fn load_from_env() -> Result<CacheSettings> {
    let defaults = CacheSettings::default();

    let settings = CacheSettings {
        cache_enabled: env_bool(ENV_CACHE_ENABLED, defaults.cache_enabled),
        cluster_context_enabled: env_bool(
            ENV_CLUSTER_CONTEXT_ENABLED,
            defaults.cluster_context_enabled,
        ),
        token_exchange_endpoint: std::env::var(ENV_TOKEN_EXCHANGE_ENDPOINT).ok(),
        cache_size: env_parse(ENV_CACHE_SIZE, defaults.cache_size)?,
        cache_ttl_seconds: env_parse(ENV_CACHE_TTL_SECONDS, defaults.cache_ttl_seconds)?,
        cache_refresh_debounce_seconds: env_parse(
            ENV_CACHE_REFRESH_DEBOUNCE_SECONDS,
            defaults.cache_refresh_debounce_seconds,
        )?,
    };

    settings.ensure()?;
    Ok(settings)
}

/// Load settings from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and TOML
/// (detected by file extension). Missing fields keep their defaults.
///
/// # Errors
/// Returns `ClavisError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The settings fail validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<CacheSettings> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ClavisError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ClavisError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ClavisError::Config(format!("Failed to read config file: {e}")))?;

    let settings = parse_config(&contents, &config_path)?;
    settings.ensure()?;
    Ok(settings)
}

/// Parse settings by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<CacheSettings> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ClavisError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ClavisError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ClavisError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// Searches the current working directory first, then the executable's
/// directory. Returns the first file that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Parse a numeric environment variable, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ClavisError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
