use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::api::transport::{RequestBody, RequestConfig, Transport};
use crate::auth::HeaderSet;
use crate::types::ApiError;

/// A request as seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub config: RequestConfig,
    pub body: RequestBody,
    pub headers: HeaderSet,
}

/// Scripted transport that records every call.
///
/// Routes (URL substring → response) are checked first and answer any number
/// of calls; otherwise queued responses are consumed in order.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<Vec<(String, Result<Value, ApiError>)>>>,
    queued: Arc<Mutex<VecDeque<Result<Value, ApiError>>>>,
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: Value) -> Self {
        let transport = Self::new();
        transport.push_response(Ok(response));
        transport
    }

    pub fn with_error(error: ApiError) -> Self {
        let transport = Self::new();
        transport.push_response(Err(error));
        transport
    }

    pub fn push_response(&self, response: Result<Value, ApiError>) {
        self.queued.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
    }

    pub fn route(&self, url_contains: impl Into<String>, response: Result<Value, ApiError>) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((url_contains.into(), response));
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_call(&self) -> Option<RecordedRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        config: &RequestConfig,
        body: RequestBody,
        headers: &HeaderSet,
    ) -> Result<Value, ApiError> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(RecordedRequest {
            config: config.clone(),
            body,
            headers: headers.clone(),
        });

        let routed = self
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(pattern, _)| config.url.contains(pattern.as_str()))
            .map(|(_, response)| response.clone());

        if let Some(response) = routed {
            return response;
        }

        self.queued.lock().unwrap_or_else(PoisonError::into_inner).pop_front().unwrap_or_else(
            || {
                Err(ApiError::network(
                    None,
                    format!("MockTransport has no response for {} {}", config.method, config.url),
                ))
            },
        )
    }
}
