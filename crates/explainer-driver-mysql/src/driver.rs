//! MySQL driver implementation

use std::sync::Arc;

use explainer_core::{Connection, DatabaseConfig, ExplainerError, Result};

use crate::MySqlConnection;

/// MySQL database driver
pub struct MySqlDriver;

impl MySqlDriver {
    /// Create a new MySQL driver instance
    pub fn new() -> Self {
        tracing::debug!("MySQL driver initialized");
        Self
    }

    pub fn default_port(&self) -> u16 {
        3306
    }

    /// Opens a connection described by `config`
    #[tracing::instrument(skip(self, config), fields(host = %config.host, port = config.port, database = config.database.as_deref()))]
    pub async fn connect(&self, config: &DatabaseConfig) -> Result<Arc<dyn Connection>> {
        let port = if config.port > 0 {
            config.port
        } else {
            self.default_port()
        };

        let conn = MySqlConnection::connect(
            &config.host,
            port,
            config.database.as_deref(),
            config.username.as_deref(),
            config.password.as_deref(),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to connect to MySQL database");
            match e {
                ExplainerError::TooManyConnections(_) => e,
                other => ExplainerError::Connection(format!(
                    "Failed to connect to MySQL database at {}: {}",
                    config.connection_url_redacted(),
                    other
                )),
            }
        })?;

        Ok(Arc::new(conn))
    }
}

impl Default for MySqlDriver {
    fn default() -> Self {
        Self::new()
    }
}
