//! Transport, endpoints and response normalization.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod transport;

pub use client::ApiClient;
pub use endpoints::Endpoints;
pub use envelope::{null_as_default, response_message, unwrap_payload, Envelope, ListPayload, Page};
pub use transport::{FilePart, HttpTransport, Method, RequestBody, RequestConfig, Transport};
