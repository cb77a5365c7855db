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

//! Error types for the DBHub.io client.
//!
//! Every fallible operation in the crate returns [`Result`]. Transport and
//! decode failures are surfaced to the caller; nothing in the library
//! terminates the process.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the DBHub.io client.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value or option was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be built, sent, or its body read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape the endpoint returns.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The call was aborted through `Connection::cancel`.
    #[error("request cancelled")]
    Cancelled,

    /// The tokio runtime backing a connection could not be created.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl Error {
    /// True when the failure happened on the wire rather than in decoding.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Http { .. })
    }

    /// True when the response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
