// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Connection configuration for the DBHub.io client.

use crate::client::{ApiClient, DbHubClient, DbHubHttpClient, HttpClientConfig};
use crate::connection::{Connection, ConnectionConfig};
use crate::error::{Error, Result};
use crate::logging::{init_logging, LogConfig};
use crate::DEFAULT_SERVER;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the API key for [`Database::from_env`].
pub const API_KEY_ENV: &str = "DBHUB_API_KEY";
/// Environment variable overriding the server for [`Database::from_env`].
pub const SERVER_ENV: &str = "DBHUB_SERVER";

/// Holds the configuration used to create [`Connection`]s.
///
/// Options can be set through the `with_*` builder methods, through string
/// keys with [`Database::set_option`], or read from the environment with
/// [`Database::from_env`].
#[derive(Clone)]
pub struct Database {
    server: String,
    api_key: Option<String>,

    // HTTP client configuration
    http_config: HttpClientConfig,

    // Logging configuration
    log_config: LogConfig,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("server", &self.server)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("http_config", &self.http_config)
            .field("log_config", &self.log_config)
            .finish()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            api_key: None,
            http_config: HttpClientConfig::default(),
            log_config: LogConfig::default(),
        }
    }
}

impl Database {
    /// Creates a new Database pointing at the default server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Database from `DBHUB_API_KEY` and, if set, `DBHUB_SERVER`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut db = Self::new();
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            db.api_key = Some(key);
        }
        if let Some(server) = lookup(SERVER_ENV).filter(|s| !s.is_empty()) {
            db.server = server;
        }
        db
    }

    /// Sets the API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Changes the server address all requests are sent to. Useful for
    /// testing and development.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Replaces the HTTP client configuration.
    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Returns the configured server address.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Returns whether an API key has been set.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the HTTP client configuration.
    pub fn http_config(&self) -> &HttpClientConfig {
        &self.http_config
    }

    /// Parse a millisecond duration option value.
    fn parse_millis(key: &str, value: &str) -> Result<Duration> {
        value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| Self::invalid_value(key, value))
    }

    fn invalid_value(key: &str, value: &str) -> Error {
        Error::invalid_argument(format!("invalid value '{}' for option '{}'", value, key))
    }

    /// Set an option by string key.
    ///
    /// | Key | Value |
    /// |-----|-------|
    /// | `dbhub.api_key` | API key |
    /// | `dbhub.server` | Server address |
    /// | `dbhub.http.connect_timeout_ms` | Connect timeout in ms |
    /// | `dbhub.http.timeout_ms` | Request timeout in ms |
    /// | `dbhub.http.max_idle_per_host` | Idle connections kept per host |
    /// | `dbhub.http.user_agent` | User-Agent header |
    /// | `dbhub.log_level` | `off`, `error`, `warn`, `info`, `debug`, `trace` |
    /// | `dbhub.log_file` | Append logs to this file instead of stderr |
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "dbhub.api_key" => {
                self.api_key = Some(value.to_string());
            }
            "dbhub.server" => {
                self.server = value.to_string();
            }
            "dbhub.http.connect_timeout_ms" => {
                self.http_config.connect_timeout = Self::parse_millis(key, value)?;
            }
            "dbhub.http.timeout_ms" => {
                self.http_config.timeout = Self::parse_millis(key, value)?;
            }
            "dbhub.http.max_idle_per_host" => {
                self.http_config.max_idle_per_host = value
                    .trim()
                    .parse()
                    .map_err(|_| Self::invalid_value(key, value))?;
            }
            "dbhub.http.user_agent" => {
                self.http_config.user_agent = value.to_string();
            }
            "dbhub.log_level" => {
                if !LogConfig::is_valid_level(value) {
                    return Err(Self::invalid_value(key, value));
                }
                self.log_config.level = Some(value.to_string());
            }
            "dbhub.log_file" => {
                self.log_config.file = Some(value.to_string());
            }
            _ => {
                return Err(Error::invalid_argument(format!("unknown option '{}'", key)));
            }
        }
        Ok(())
    }

    /// Read back an option by string key. The API key is never returned.
    pub fn get_option(&self, key: &str) -> Result<String> {
        let value = match key {
            "dbhub.server" => Some(self.server.clone()),
            "dbhub.http.connect_timeout_ms" => {
                Some(self.http_config.connect_timeout.as_millis().to_string())
            }
            "dbhub.http.timeout_ms" => Some(self.http_config.timeout.as_millis().to_string()),
            "dbhub.http.max_idle_per_host" => {
                Some(self.http_config.max_idle_per_host.to_string())
            }
            "dbhub.http.user_agent" => Some(self.http_config.user_agent.clone()),
            "dbhub.log_level" => self.log_config.level.clone(),
            "dbhub.log_file" => self.log_config.file.clone(),
            _ => {
                return Err(Error::invalid_argument(format!("unknown option '{}'", key)));
            }
        };
        value.ok_or_else(|| Error::invalid_argument(format!("option '{}' is not set", key)))
    }

    fn validate_server(server: &str) -> Result<()> {
        let rest = server
            .strip_prefix("https://")
            .or_else(|| server.strip_prefix("http://"))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "server '{}' must start with http:// or https://",
                    server
                ))
            })?;
        if rest.trim_end_matches('/').is_empty() {
            return Err(Error::invalid_argument(format!(
                "server '{}' has no host",
                server
            )));
        }
        Ok(())
    }

    /// Create a connection with the current configuration.
    ///
    /// No request is sent; the API key is checked by the server on the first
    /// call.
    pub fn connect(&self) -> Result<Connection> {
        // Validate required options
        let api_key = self
            .api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::invalid_argument("api key not set"))?;
        Self::validate_server(&self.server)?;

        init_logging(&self.log_config);

        debug!("Creating connection to {}", self.server);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("dbhub-client")
            .build()
            .map_err(Error::Runtime)?;

        // Build the HTTP client inside the runtime that will drive it
        let http_client = {
            let _guard = runtime.enter();
            Arc::new(DbHubHttpClient::new(self.http_config.clone())?)
        };

        let client: Arc<dyn DbHubClient> = Arc::new(ApiClient::new(
            http_client,
            self.server.clone(),
            api_key.clone(),
        ));

        Ok(Connection::new_with_runtime(
            ConnectionConfig {
                server: self.server.clone(),
                client,
            },
            runtime,
        ))
    }
}
