pub mod models;
pub mod service;
pub mod validation;

pub use models::{Badge, BadgeInfo, Chapter, City, Member, MemberQuery, MemberStats};
pub use service::MemberDirectoryService;
pub use validation::{validate_member, MemberDraft, ValidationReport};
