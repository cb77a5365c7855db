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

//! DBHub.io client for Rust
//!
//! This crate provides a client for the DBHub.io API, which hosts SQLite
//! databases and lets callers inspect and query them over HTTPS.
//!
//! ## Overview
//!
//! - [`Database`] - Holds connection configuration
//! - [`Connection`] - Blocking client for the remote operations
//! - [`Results`] - Rows returned by a query, one string field per column
//!
//! ## Example
//!
//! ```ignore
//! use dbhub::Connection;
//!
//! let conn = Connection::new("YOUR_API_KEY")?;
//! let tables = conn.tables("justinclift", "Join Testing.sqlite")?;
//! let results = conn.query(
//!     "justinclift",
//!     "Join Testing.sqlite",
//!     false,
//!     "SELECT table1.Name, table2.value FROM table1 JOIN table2 USING (id)",
//! )?;
//! for row in &results {
//!     println!("{}", row.fields.join(" | "));
//! }
//! ```
//!
//! ## Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `dbhub.api_key` | | API key sent with every request |
//! | `dbhub.server` | `https://api.dbhub.io` | Server address |
//! | `dbhub.http.connect_timeout_ms` | 30000 | Connect timeout |
//! | `dbhub.http.timeout_ms` | 60000 | Request timeout |
//! | `dbhub.http.max_idle_per_host` | 10 | Idle connections kept |
//! | `dbhub.http.user_agent` | `dbhub-rust/<version>` | User-Agent header |
//! | `dbhub.log_level` | `warn` | Log level for the `dbhub` target |
//! | `dbhub.log_file` | stderr | Log destination |

pub mod client;
pub mod connection;
pub mod database;
pub mod error;
pub(crate) mod logging;
pub mod result;
pub mod types;

/// Version of this library.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address of the public DBHub.io API server.
pub const DEFAULT_SERVER: &str = "https://api.dbhub.io";

// Re-export main types
pub use connection::Connection;
pub use database::Database;
pub use error::{Error, Result};
pub use result::{ResultRow, Results};
pub use types::api::{ApiColumn, IndexMap, ValueKind};

// Re-export client types for advanced users
pub use client::{ApiClient, DbHubClient, DbHubHttpClient, HttpClientConfig};
