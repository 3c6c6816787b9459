//! Database connection configuration
//!
//! Configuration is read from a TOML file with a single `[database]` table:
//!
//! ```toml
//! [database]
//! host = "127.0.0.1"
//! port = 3306
//! database = "shop"
//! username = "root"
//! password = "secret"
//! ```
//!
//! Every key is optional; missing keys fall back to [`DatabaseConfig::default`].

use crate::{ExplainerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection settings for the database that runs the EXPLAIN queries
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Database (schema) name
    pub database: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            database: None,
            username: Some("root".to_string()),
            password: None,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: DatabaseConfig,
}

impl DatabaseConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| ExplainerError::Configuration(format!("invalid config: {}", e)))?;
        Ok(file.database)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExplainerError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load the configuration from `path`, or from the default location when
    /// `path` is `None`. A missing default file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Sets the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Render the configuration as `mysql://[user[:password]@]host:port[/database]`
    pub fn connection_url(&self) -> String {
        self.render_url(self.password.as_deref())
    }

    /// Like [`connection_url`](Self::connection_url), with the password
    /// replaced by `***`. Safe to log.
    pub fn connection_url_redacted(&self) -> String {
        self.render_url(self.password.as_ref().map(|_| "***"))
    }

    fn render_url(&self, password: Option<&str>) -> String {
        let mut conn_str = String::from("mysql://");

        if let Some(u) = &self.username {
            conn_str.push_str(u);
            if let Some(p) = password {
                conn_str.push(':');
                conn_str.push_str(p);
            }
            conn_str.push('@');
        }

        conn_str.push_str(&format!("{}:{}", self.host, self.port));

        if let Some(db) = &self.database {
            conn_str.push('/');
            conn_str.push_str(db);
        }

        conn_str
    }
}

/// `<config dir>/explainer/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("explainer").join("config.toml"))
}
