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

//! In-process axum server standing in for the DBHub.io API.
//!
//! The server answers the five `/v1/*` routes from a queue of canned
//! responses and records every form it receives. It runs on its own tokio
//! runtime so the blocking `Connection` under test can be driven from a
//! plain `#[test]`.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Router};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

const ROUTES: [&str; 5] = [
    "/v1/tables",
    "/v1/views",
    "/v1/columns",
    "/v1/indexes",
    "/v1/query",
];

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Default)]
struct MockState {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<VecDeque<RecordedRequest>>,
}

/// Handle to a running mock server. Dropping it shuts the server down.
pub struct MockServer {
    url: String,
    state: Arc<MockState>,
    runtime: Runtime,
}

impl MockServer {
    /// Serve `responses` in order, one per request, on any `/v1/*` route.
    pub fn start(responses: Vec<MockResponse>) -> Self {
        let state = Arc::new(MockState {
            responses: Mutex::new(responses.into()),
            ..MockState::default()
        });
        let app = ROUTES
            .iter()
            .fold(Router::new(), |router, path| router.route(path, post(respond)))
            .with_state(state.clone());
        Self::serve(app, state)
    }

    /// Accept requests but never answer them.
    pub fn silent() -> Self {
        let state = Arc::new(MockState::default());
        let app = ROUTES
            .iter()
            .fold(Router::new(), |router, path| router.route(path, post(hang)));
        Self::serve(app, state)
    }

    fn serve(app: Router, state: Arc<MockState>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        runtime.spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url,
            state,
            runtime,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The oldest request not yet taken.
    ///
    /// The client only returns once the response has been written, so every
    /// completed call has already been recorded.
    pub fn next_request(&self) -> RecordedRequest {
        self.state
            .requests
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock server received no request")
    }

    /// Number of requests recorded and not yet taken.
    pub fn pending_requests(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push_back(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        form,
    });

    let next = state.responses.lock().unwrap().pop_front();
    match next {
        Some(response) => (
            StatusCode::from_u16(response.status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            response.body,
        )
            .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no canned response left").into_response(),
    }
}

async fn hang() -> Response {
    std::future::pending::<Response>().await
}

/// An address with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
