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

//! Blocking connection to a DBHub.io server.

use crate::client::DbHubClient;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::result::Results;
use crate::types::api::{ApiColumn, IndexMap};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Configuration passed from Database to Connection.
pub(crate) struct ConnectionConfig {
    pub server: String,
    pub client: Arc<dyn DbHubClient>,
}

/// A connection to a DBHub.io API server.
///
/// Every method blocks the calling thread until its single HTTP request
/// completes or fails. The server address and API key are fixed when the
/// connection is created, so a `Connection` can be shared between threads
/// and used concurrently.
///
/// The methods drive an internal tokio runtime and must not be called from
/// within an async context.
#[derive(Debug)]
pub struct Connection {
    server: String,

    // Client trait object so tests can substitute the transport
    client: Arc<dyn DbHubClient>,

    // Token shared by all calls in flight; replaced after each cancel()
    cancel_token: Mutex<CancellationToken>,

    runtime: tokio::runtime::Runtime,
}

impl Connection {
    /// Connect to the default DBHub.io server with `api_key`.
    ///
    /// No request is made; the key is first checked by the server on the
    /// first call.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Database::new().with_api_key(api_key).connect()
    }

    /// Called by Database::connect().
    pub(crate) fn new_with_runtime(
        config: ConnectionConfig,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        debug!("Created connection to {}", config.server);
        Self {
            server: config.server,
            client: config.client,
            cancel_token: Mutex::new(CancellationToken::new()),
            runtime,
        }
    }

    /// Returns the server address requests are sent to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Returns the list of tables in the database.
    pub fn tables(&self, owner: &str, database: &str) -> Result<Vec<String>> {
        self.run(self.client.tables(owner, database))
    }

    /// Returns the list of views in the database.
    pub fn views(&self, owner: &str, database: &str) -> Result<Vec<String>> {
        self.run(self.client.views(owner, database))
    }

    /// Returns the column information for a table or view.
    pub fn columns(&self, owner: &str, database: &str, table: &str) -> Result<Vec<ApiColumn>> {
        self.run(self.client.columns(owner, database, table))
    }

    /// Returns the indexes in the database, mapped to the table each belongs to.
    pub fn indexes(&self, owner: &str, database: &str) -> Result<IndexMap> {
        self.run(self.client.indexes(owner, database))
    }

    /// Runs a SQL query (SELECT only) on the database and returns the results.
    ///
    /// `blob_base64` chooses whether BLOB fields are base64 encoded in the
    /// output, or skipped using an empty string as placeholder. The server
    /// decides which statements are allowed.
    pub fn query(
        &self,
        owner: &str,
        database: &str,
        blob_base64: bool,
        sql: &str,
    ) -> Result<Results> {
        self.run(self.client.query(owner, database, blob_base64, sql))
    }

    /// Abort every call currently in flight on this connection.
    ///
    /// Aborted calls return [`Error::Cancelled`]. Calls started afterwards
    /// are unaffected.
    pub fn cancel(&self) {
        let mut token = self
            .cancel_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        debug!("Cancelling in-flight calls to {}", self.server);
        token.cancel();
        *token = CancellationToken::new();
    }

    fn current_token(&self) -> CancellationToken {
        self.cancel_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drive `call` to completion unless the connection is cancelled first.
    fn run<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let token = self.current_token();
        self.runtime.block_on(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::Cancelled),
                result = call => result,
            }
        })
    }
}
