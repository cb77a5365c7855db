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

//! HTTP client implementation for the DBHub.io API.
//!
//! This module provides a thin HTTP client with:
//! - Connection reuse (via reqwest)
//! - Form-encoded POST requests
//! - Configurable timeouts
//!
//! Requests are never retried; a failure is returned to the caller as is.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Overall request timeout, from sending the request to reading the body.
    pub timeout: Duration,
    /// Maximum number of idle connections kept per host.
    pub max_idle_per_host: usize,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(60),
            max_idle_per_host: 10,
            user_agent: format!("dbhub-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for communicating with a DBHub.io API server.
#[derive(Debug)]
pub struct DbHubHttpClient {
    client: Client,
}

impl DbHubHttpClient {
    /// Creates a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::invalid_argument(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// POST `form` as an `application/x-www-form-urlencoded` body and return
    /// the response body.
    ///
    /// Any non-2xx status is returned as [`Error::Http`] with the body the
    /// server sent, since the API reports failures as plain text.
    pub async fn post_form<T>(&self, url: &str, form: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            debug!("POST {} returned {}", url, status);
            return Err(Error::Http {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!("POST {} returned {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}
