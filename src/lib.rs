//! Member Portal Client
//!
//! Typed client for the membership portal backend: events, the member
//! directory and the signed-in member's profile. Requests carry the stored
//! bearer token, responses are normalized whether or not they come wrapped in
//! a `{success, message, data}` envelope, and directory lists are cached.

pub mod api;
pub mod auth;
pub mod config;
pub mod directory;
pub mod events;
pub mod mocks;
pub mod notify;
pub mod portal;
pub mod profile;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use portal::PortalClient;
pub use types::{ApiError, ClientConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_NAME: &str = "member-portal-client";
