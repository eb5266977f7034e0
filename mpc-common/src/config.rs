//! Configuration loading and resolution
//!
//! Bootstrap settings come from a TOML file, then environment overrides, then
//! command-line flags (applied by the binary). API keys additionally consult
//! the `settings` table, which takes priority so keys can be rotated from the
//! admin panel without a restart:
//!
//! 1. Database `settings` row
//! 2. Environment variable
//! 3. TOML config file

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MPC_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub rapidapi: RapidApiConfig,
    pub mobileapi: MobileApiConfig,
    pub openai: OpenAiConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; OS data directory when absent
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: crate::db::init::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL used in sitemap.xml and robots.txt
    pub url: String,
    /// Seed the sample catalog into an empty database at startup
    pub seed_sample_data: bool,
    /// Number of mobiles returned by /api/featured
    pub featured_limit: i64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            seed_sample_data: true,
            featured_limit: 8,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: String,
    /// HS256 signing secret; a fixed development secret is used when absent
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            jwt_secret: None,
            token_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RapidApiConfig {
    pub api_key: Option<String>,
    pub host: String,
    pub base_url: String,
}

impl Default for RapidApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: "mobile-phone-specs-database.p.rapidapi.com".to_string(),
            base_url: "https://mobile-phone-specs-database.p.rapidapi.com/gsm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MobileApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for MobileApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.mobileapi.dev".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Fixed delay before each upstream call
    pub request_delay_ms: u64,
    /// Upper bound for the `limit` accepted by import endpoints
    pub max_limit: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 100,
            max_limit: 100,
        }
    }
}

impl TomlConfig {
    /// Parse TOML text (missing sections fall back to defaults)
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Apply `MPC_*` environment overrides for bootstrap values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MPC_SITE_URL") {
            self.site.url = url;
        }
        if let Ok(username) = std::env::var("MPC_ADMIN_USERNAME") {
            self.auth.admin_username = username;
        }
        if let Ok(password) = std::env::var("MPC_ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }
        if let Ok(secret) = std::env::var("MPC_JWT_SECRET") {
            if is_valid_key(&secret) {
                self.auth.jwt_secret = Some(secret);
            }
        }
        if let Ok(level) = std::env::var("MPC_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Database path from config, else the OS default
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

/// Load bootstrap config
///
/// Priority: explicit path → `MPC_CONFIG` → `<config_dir>/mpc/config.toml`.
/// An explicitly named file must exist; the default location may be absent,
/// in which case built-in defaults are used.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

    let path = match named {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                info!("No config file found, using built-in defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = TomlConfig::parse(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// `<config_dir>/mpc/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mpc").join("config.toml"))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mpc"))
        .unwrap_or_else(|| PathBuf::from("./mpc_data"))
        .join("mpc.db")
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Where a resolved API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    Database,
    Environment,
    Toml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub value: String,
    pub source: KeySource,
}

/// Resolve an API key: settings table → environment → TOML
///
/// Returns `Ok(None)` when no source has a usable value; callers treat that
/// as "integration not configured" rather than an error.
pub async fn resolve_api_key(
    db: &SqlitePool,
    setting_key: &str,
    env_var: &str,
    toml_value: Option<&str>,
) -> Result<Option<ResolvedKey>> {
    let db_key = crate::db::settings::get_setting::<String>(db, setting_key)
        .await?
        .filter(|k| is_valid_key(k));
    let env_key = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_value.filter(|k| is_valid_key(k)).map(str::to_string);

    let candidates = [
        (db_key, KeySource::Database),
        (env_key, KeySource::Environment),
        (toml_key, KeySource::Toml),
    ];

    let present: Vec<KeySource> = candidates
        .iter()
        .filter(|(value, _)| value.is_some())
        .map(|(_, source)| *source)
        .collect();
    if present.len() > 1 {
        warn!(
            setting = setting_key,
            sources = ?present,
            "API key found in multiple sources; using highest priority"
        );
    }

    let resolved = candidates
        .into_iter()
        .find_map(|(value, source)| value.map(|value| ResolvedKey { value, source }));

    if let Some(key) = &resolved {
        info!(setting = setting_key, source = ?key.source, "API key resolved");
    }

    Ok(resolved)
}
