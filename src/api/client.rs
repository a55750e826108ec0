//! Shared plumbing for the portal services

use serde_json::Value;
use std::sync::Arc;

use crate::api::transport::{RequestBody, RequestConfig, Transport};
use crate::auth::{HeaderSet, RequestBuilder, TokenStore};
use crate::notify::{Notifier, ToastKind};
use crate::types::ApiError;

/// Transport, request builder and notifier bundled for the services.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: TokenStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            transport,
            builder: RequestBuilder::new(tokens),
            notifier,
        }
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn tokens(&self) -> &TokenStore {
        self.builder.tokens()
    }

    pub async fn send(
        &self,
        config: RequestConfig,
        body: RequestBody,
        headers: &HeaderSet,
    ) -> Result<Value, ApiError> {
        log::debug!("{} {}", config.method, config.url);
        self.transport.request(&config, body, headers).await
    }

    pub fn notify(&self, message: &str, kind: ToastKind) {
        self.notifier.show_toast(message, kind);
    }

    /// Log a failed call and raise an error toast; the result passes through.
    pub fn reported<T>(&self, result: Result<T, ApiError>, fallback: &str) -> Result<T, ApiError> {
        if let Err(error) = &result {
            log::error!("{}: {}", fallback, error);
            self.notify(&error.user_message(fallback), ToastKind::Error);
        }
        result
    }

    /// Like [`reported`](Self::reported) without the toast
    pub fn logged<T>(&self, result: Result<T, ApiError>, context: &str) -> Result<T, ApiError> {
        if let Err(error) = &result {
            log::error!("{}: {}", context, error);
        }
        result
    }
}
