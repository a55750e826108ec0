//! Token storage, header construction and token-derived identity.

pub mod builder;
pub mod headers;
pub mod jwt;
pub mod session;
pub mod token_store;

pub use builder::RequestBuilder;
pub use headers::{Header, HeaderSet};
pub use jwt::{IdentityClaim, IdentityField, IdentityPolicy, MissingClaim, TokenClaims};
pub use session::{Session, USER_DATA_KEY};
pub use token_store::TokenStore;
