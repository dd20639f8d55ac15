//! Connection settings and table prefix, from a YAML file or the environment.

use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
    pub dbname: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub dbtableprefix: String,
    /// Full connection string; takes precedence over the individual fields.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    5432
}

impl AppConfig {
    /// Load from `path` when given, else `CONFIG_PATH`, else `config.yaml`.
    /// Falls back to environment variables when that file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = path
            .map(|p| p.to_path_buf())
            .or_else(|| env::var("CONFIG_PATH").ok().map(Into::into))
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());

        let mut config = if path.exists() {
            tracing::info!(path = %path.display(), "loading config file");
            Self::from_file(&path)?
        } else {
            Self::from_env()?
        };
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = Some(url);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").ok();
        // With a full URL the individual fields are informational only.
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match env::var(name) {
                Ok(v) => Ok(v),
                Err(_) if database_url.is_some() => Ok(String::new()),
                Err(_) => Err(ConfigError::Missing(name)),
            }
        };
        let port = match env::var("DB_PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_PORT",
                value: v,
            })?,
            Err(_) => default_port(),
        };
        Ok(AppConfig {
            dbname: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            host: env::var("DB_HOST").unwrap_or_else(|_| default_host()),
            port,
            dbtableprefix: env::var("DB_TABLE_PREFIX").unwrap_or_default(),
            database_url,
        })
    }

    pub fn table_prefix(&self) -> &str {
        &self.dbtableprefix
    }
}
