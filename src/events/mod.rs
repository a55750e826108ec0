pub mod models;
pub mod service;

pub use models::{Event, EventGallery, EventKind, EventMedia, EventMode};
pub use service::EventService;
