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

//! REST client for the DBHub.io `/v1` API.
//!
//! Every endpoint takes a form-encoded POST carrying the API key and the
//! database coordinates, and answers with a JSON body.

use crate::client::{DbHubClient, DbHubHttpClient};
use crate::error::{Error, Result};
use crate::result::Results;
use crate::types::api::{
    ApiColumn, ColumnsRequest, DataRow, DatabaseParams, IndexMap, QueryRequest,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const TABLES_PATH: &str = "/v1/tables";
const VIEWS_PATH: &str = "/v1/views";
const COLUMNS_PATH: &str = "/v1/columns";
const INDEXES_PATH: &str = "/v1/indexes";
const QUERY_PATH: &str = "/v1/query";

/// Client for the DBHub.io REST API.
pub struct ApiClient {
    http_client: Arc<DbHubHttpClient>,
    server: String,
    api_key: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("server", &self.server)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Create a new client for `server` authenticating with `api_key`.
    pub fn new(
        http_client: Arc<DbHubHttpClient>,
        server: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            server: server.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the full URL for an endpoint path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.trim_end_matches('/'), path)
    }

    fn database_params<'a>(&'a self, owner: &'a str, database: &'a str) -> DatabaseParams<'a> {
        DatabaseParams {
            apikey: &self.api_key,
            dbowner: owner,
            dbname: database,
        }
    }

    fn columns_request<'a>(
        &'a self,
        owner: &'a str,
        database: &'a str,
        table: &'a str,
    ) -> ColumnsRequest<'a> {
        ColumnsRequest {
            apikey: &self.api_key,
            dbowner: owner,
            dbname: database,
            table,
        }
    }

    /// The SQL text travels base64 encoded.
    fn query_request<'a>(&'a self, owner: &'a str, database: &'a str, sql: &str) -> QueryRequest<'a> {
        QueryRequest {
            apikey: &self.api_key,
            dbowner: owner,
            dbname: database,
            sql: STANDARD.encode(sql.as_bytes()),
        }
    }

    /// POST `form` to `path` and decode the JSON body.
    async fn fetch<F, T>(&self, endpoint: &'static str, path: &str, form: &F) -> Result<T>
    where
        F: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("Calling {} at {}", endpoint, url);

        let body = self.http_client.post_form(&url, form).await?;
        decode_response(endpoint, &body)
    }
}

/// Decode a response body, reporting which endpoint it came from on failure.
pub(crate) fn decode_response<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Decode { endpoint, source })
}

#[async_trait]
impl DbHubClient for ApiClient {
    async fn tables(&self, owner: &str, database: &str) -> Result<Vec<String>> {
        let params = self.database_params(owner, database);
        let tables: Vec<String> = self.fetch("tables", TABLES_PATH, &params).await?;
        debug!("{}/{} has {} tables", owner, database, tables.len());
        Ok(tables)
    }

    async fn views(&self, owner: &str, database: &str) -> Result<Vec<String>> {
        let params = self.database_params(owner, database);
        let views: Vec<String> = self.fetch("views", VIEWS_PATH, &params).await?;
        debug!("{}/{} has {} views", owner, database, views.len());
        Ok(views)
    }

    async fn columns(&self, owner: &str, database: &str, table: &str) -> Result<Vec<ApiColumn>> {
        let params = self.columns_request(owner, database, table);
        let columns: Vec<ApiColumn> = self.fetch("columns", COLUMNS_PATH, &params).await?;
        debug!(
            "{}/{} table {} has {} columns",
            owner,
            database,
            table,
            columns.len()
        );
        Ok(columns)
    }

    async fn indexes(&self, owner: &str, database: &str) -> Result<IndexMap> {
        let params = self.database_params(owner, database);
        let indexes: IndexMap = self.fetch("indexes", INDEXES_PATH, &params).await?;
        debug!("{}/{} has {} indexes", owner, database, indexes.len());
        Ok(indexes)
    }

    async fn query(
        &self,
        owner: &str,
        database: &str,
        blob_base64: bool,
        sql: &str,
    ) -> Result<Results> {
        let params = self.query_request(owner, database, sql);
        let data: Vec<DataRow> = self.fetch("query", QUERY_PATH, &params).await?;
        debug!("Query on {}/{} returned {} rows", owner, database, data.len());
        Ok(Results::from_data_rows(data, blob_base64))
    }
}
