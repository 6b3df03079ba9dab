// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory transport for tests and offline runs.
//
// Routes are keyed by method and path (query strings are ignored for
// matching but recorded).  Unrouted requests answer 404.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use cardserv_core::error::Result;

use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Canned-response transport.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.  Responses are served in order;
    /// the last one keeps being served once the queue is down to it.
    pub fn respond(&self, method: Method, path: &str, response: ApiResponse) -> &Self {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a 200 response with a JSON body.
    pub fn respond_json(&self, method: Method, path: &str, body: serde_json::Value) -> &Self {
        self.respond(method, path, ApiResponse::ok(body.to_string()))
    }

    /// All requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Requests seen for one path.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.path() == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let key = (request.method, request.path());
        lock(&self.requests).push(request);

        let mut routes = lock(&self.routes);
        let response = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        debug!(method = %key.0, path = %key.1, routed = response.is_some(), "mock request");
        Ok(response.unwrap_or_else(|| ApiResponse::new(404, r#"{"message":"no such route"}"#)))
    }
}
