//! HTTP transport
//!
//! The services only depend on the [`Transport`] trait. [`HttpTransport`] is
//! the reqwest-backed implementation; tests use the recording mock in
//! `crate::mocks`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::fmt;

use crate::auth::HeaderSet;
use crate::types::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub url: String,
    pub method: Method,
}

impl RequestConfig {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }
}

/// One file in a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FilePart>),
}

/// Performs a single call and yields the decoded JSON body.
///
/// Implementations must not retry. A rejected call or a non-2xx answer is an
/// [`ApiError::Network`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        config: &RequestConfig,
        body: RequestBody,
        headers: &HeaderSet,
    ) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("member-portal-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        config: &RequestConfig,
        body: RequestBody,
        headers: &HeaderSet,
    ) -> Result<Value, ApiError> {
        let mut request = self.client.request(config.method.into(), config.url.as_str());

        for header in headers {
            request = request.header(header.name.as_str(), header.value.as_str());
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(files) => request.multipart(build_form(files)?),
        };

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let payload = parse_body(&bytes);

        if !status.is_success() {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

            log::debug!("{} {} answered {}", config.method, config.url, status);
            return Err(ApiError::network(Some(status.as_u16()), message));
        }

        Ok(payload)
    }
}

fn build_form(files: Vec<FilePart>) -> Result<Form, ApiError> {
    let mut form = Form::new();

    for file in files {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime_type) = file.mime_type {
            part = part.mime_str(&mime_type).map_err(|e| {
                ApiError::Validation(format!("Invalid MIME type '{}': {}", mime_type, e))
            })?;
        }
        form = form.part(file.field, part);
    }

    Ok(form)
}

/// Empty bodies become `null`; non-JSON bodies are kept as a string.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b""), Value::Null);
        assert_eq!(parse_body(b"  \n"), Value::Null);
        assert_eq!(parse_body(br#"{"success":true}"#), json!({"success": true}));
        assert_eq!(parse_body(b"Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn test_request_config_constructors() {
        let config = RequestConfig::put("https://example.test/update-User/1");
        assert_eq!(config.method, Method::Put);
        assert_eq!(config.method.to_string(), "PUT");
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_build_form_rejects_bad_mime_type() {
        let file = FilePart::new("profilePic", "me.png", vec![1, 2, 3]).with_mime_type("not a mime");
        assert!(matches!(build_form(vec![file]), Err(ApiError::Validation(_))));

        let file = FilePart::new("profilePic", "me.png", vec![1, 2, 3]).with_mime_type("image/png");
        assert!(build_form(vec![file]).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_failure() {
        let transport = HttpTransport::new().unwrap();
        let result = transport
            .request(
                &RequestConfig::get("http://127.0.0.1:9/unreachable"),
                RequestBody::Empty,
                &HeaderSet::new(),
            )
            .await;

        assert!(matches!(result, Err(ApiError::Network { .. })));
    }
}
