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

//! Client implementations for communicating with the DBHub.io API.
//!
//! This module provides:
//! - `DbHubClient` trait: Abstract interface for the remote operations
//! - `DbHubHttpClient`: Low-level HTTP client
//! - `ApiClient`: Implementation against the `/v1/*` REST endpoints

pub mod api;
pub mod http;

use crate::error::Result;
use crate::result::Results;
use crate::types::api::{ApiColumn, IndexMap};
use async_trait::async_trait;

pub use api::ApiClient;
pub use http::{DbHubHttpClient, HttpClientConfig};

/// Abstract interface for the DBHub.io read operations.
///
/// `owner` and `database` identify the hosted database in every call.
/// Implementations perform at most one request per call and return either
/// a complete result or an error.
#[async_trait]
pub trait DbHubClient: Send + Sync + std::fmt::Debug {
    /// List the tables in a database.
    async fn tables(&self, owner: &str, database: &str) -> Result<Vec<String>>;

    /// List the views in a database.
    async fn views(&self, owner: &str, database: &str) -> Result<Vec<String>>;

    /// Describe the columns of a table or view.
    async fn columns(&self, owner: &str, database: &str, table: &str) -> Result<Vec<ApiColumn>>;

    /// List the indexes in a database along with the table each belongs to.
    async fn indexes(&self, owner: &str, database: &str) -> Result<IndexMap>;

    /// Run a read-only SQL query.
    ///
    /// With `blob_base64` set, BLOB fields are base64 encoded in the output;
    /// otherwise they are skipped using an empty string as placeholder.
    async fn query(
        &self,
        owner: &str,
        database: &str,
        blob_base64: bool,
        sql: &str,
    ) -> Result<Results>;
}
