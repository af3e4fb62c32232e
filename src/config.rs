use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Default cap on natural-language query length, in characters.
pub const DEFAULT_NL_QUERY_MAX_CHARS: usize = 512;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the string analyzer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Snapshot file for persistent storage; records live in memory only when absent.
    pub store_path: Option<PathBuf>,
    /// Longest natural-language query accepted, in characters.
    pub nl_query_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: None,
            store_path: None,
            nl_query_max_chars: DEFAULT_NL_QUERY_MAX_CHARS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            store_path: load_env_optional("STRING_STORE_PATH").map(PathBuf::from),
            nl_query_max_chars: load_env_optional("NL_QUERY_MAX_CHARS")
                .map(|value| match value.parse::<usize>() {
                    Ok(limit) if limit > 0 => Ok(limit),
                    _ => Err(ConfigError::InvalidValue("NL_QUERY_MAX_CHARS".into())),
                })
                .transpose()?
                .unwrap_or(DEFAULT_NL_QUERY_MAX_CHARS),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load configuration from the environment and install it in the global cache.
///
/// Later calls return the configuration installed by the first one.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        server_port = ?config.server_port,
        store_path = ?config.store_path,
        nl_query_max_chars = config.nl_query_max_chars,
        "Loaded configuration"
    );
    Ok(CONFIG.get_or_init(|| config))
}
