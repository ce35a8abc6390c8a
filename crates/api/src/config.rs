use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use jis_site_core::document::AdminSeed;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("APP_ENV must be \"development\" or \"production\", got {0:?}")]
    UnknownEnv(String),
    #[error("ADMIN_USERNAME and ADMIN_PASSWORD must be set together")]
    PartialSeed,
}

/// Deployment mode. Production masks internal error detail and restricts CORS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            _ => Err(ConfigError::UnknownEnv(s.to_string())),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Path of the JSON document store.
    pub db_path: PathBuf,
    /// Directory uploaded files are written to and served from.
    pub uploads_path: PathBuf,
    pub app_env: AppEnv,
    /// Origins allowed by CORS in production.
    pub cors_origins: Vec<String>,
    /// Signing secret used when the document carries none.
    pub jwt_secret: Option<String>,
    /// Lifetime of issued login tokens.
    pub token_ttl_secs: i64,
    /// Largest accepted request body, uploads included.
    pub max_upload_bytes: usize,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
    /// Admin account written into a freshly created store.
    pub admin_seed: Option<AdminSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            db_path: PathBuf::from("./db.json"),
            uploads_path: PathBuf::from("./uploads"),
            app_env: AppEnv::Development,
            cors_origins: Vec::new(),
            jwt_secret: None,
            token_ttl_secs: 3600,
            max_upload_bytes: 10 * 1024 * 1024,
            event_bus_capacity: 1024,
            log_level: "info".to_string(),
            admin_seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let admin_seed = match (var("ADMIN_USERNAME"), var("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminSeed { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialSeed),
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse(&var, "PORT", "port number", defaults.port)?,
            db_path: var("DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            uploads_path: var("UPLOADS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_path),
            app_env: var("APP_ENV")
                .map(|value| value.parse())
                .transpose()?
                .unwrap_or_default(),
            cors_origins: var("CORS_ORIGINS")
                .map(|value| {
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            jwt_secret: var("JWT_SECRET"),
            token_ttl_secs: parse(&var, "TOKEN_TTL_SECS", "number of seconds", defaults.token_ttl_secs)?,
            max_upload_bytes: parse(&var, "MAX_UPLOAD_BYTES", "byte count", defaults.max_upload_bytes)?,
            event_bus_capacity: parse(
                &var,
                "EVENT_BUS_CAPACITY",
                "channel capacity",
                defaults.event_bus_capacity,
            )?,
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            admin_seed,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T, V>(var: &V, name: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            expected,
            value,
        }),
        None => Ok(default),
    }
}
