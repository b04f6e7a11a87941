//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Financial cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Stock ledger behavior.
    #[serde(default)]
    pub stock: StockConfig,
    /// Locale used to resolve "today".
    #[serde(default)]
    pub locale: LocaleConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Financial cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of (user, context) snapshots kept.
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    /// Optional time-to-live in seconds. Snapshots never expire when unset.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_cache_capacity(),
            ttl_secs: None,
        }
    }
}

fn default_cache_capacity() -> u64 {
    64
}

/// What to do when a stock update references a product that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingProductPolicy {
    /// Skip the quantity update, log a warning and keep going.
    #[default]
    Lenient,
    /// Abort the whole operation.
    Strict,
}

/// Stock ledger configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockConfig {
    /// Policy for missing products.
    #[serde(default)]
    pub missing_product: MissingProductPolicy,
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// IANA timezone name.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CAIXA").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or misses required keys.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
