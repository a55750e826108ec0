//! Authenticated request builder

use crate::auth::headers::{HeaderSet, APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE};
use crate::auth::jwt::{IdentityClaim, IdentityPolicy, TokenClaims};
use crate::auth::token_store::TokenStore;
use crate::types::ApiError;

/// Builds per-call headers and identity from the token store.
///
/// Nothing is cached between calls; every request reads the current token.
#[derive(Clone)]
pub struct RequestBuilder {
    tokens: TokenStore,
}

impl RequestBuilder {
    pub fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// `Authorization` and JSON `Content-Type` when a token is stored,
    /// otherwise an empty set.
    pub fn build_headers(&self) -> HeaderSet {
        match self.tokens.get() {
            Some(token) => HeaderSet::new()
                .with(AUTHORIZATION, format!("Bearer {}", token))
                .with(CONTENT_TYPE, APPLICATION_JSON),
            None => HeaderSet::new(),
        }
    }

    /// Headers for multipart uploads
    pub fn build_upload_headers(&self) -> HeaderSet {
        self.build_headers().without_content_type()
    }

    pub fn extract_identity(
        &self,
        policy: &IdentityPolicy,
    ) -> Result<Option<IdentityClaim>, ApiError> {
        let token = self.tokens.get().ok_or(ApiError::MissingToken)?;
        let claims = TokenClaims::decode(&token)?;
        policy.resolve(&claims)
    }

    /// Like [`extract_identity`](Self::extract_identity) but an absent claim
    /// is always an error.
    pub fn require_identity(&self, policy: &IdentityPolicy) -> Result<IdentityClaim, ApiError> {
        self.extract_identity(policy)?.ok_or_else(|| {
            ApiError::MalformedToken("token payload carries no user identifier".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::IdentityField;
    use crate::storage::MemoryStore;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn token_for(claims: Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"portal-test-secret"))
            .unwrap()
    }

    fn builder_with(token: Option<&str>) -> RequestBuilder {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        if let Some(token) = token {
            tokens.set(token).unwrap();
        }
        RequestBuilder::new(tokens)
    }

    #[test]
    fn test_headers_without_token_are_empty() {
        let builder = builder_with(None);

        assert!(builder.build_headers().is_empty());
        assert!(builder.build_upload_headers().is_empty());
    }

    #[test]
    fn test_headers_with_token() {
        let builder = builder_with(Some("abc.def.ghi"));
        let headers = builder.build_headers();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(AUTHORIZATION), Some("Bearer abc.def.ghi"));
        assert_eq!(headers.get(CONTENT_TYPE), Some(APPLICATION_JSON));

        let upload = builder.build_upload_headers();
        assert_eq!(upload.len(), 1);
        assert_eq!(upload.get(AUTHORIZATION), Some("Bearer abc.def.ghi"));
        assert!(!upload.contains(CONTENT_TYPE));
    }

    #[test]
    fn test_missing_token_fails_identity() {
        let builder = builder_with(None);

        let result = builder.extract_identity(&IdentityPolicy::user_id_or_fallbacks());
        assert_eq!(result, Err(ApiError::MissingToken));

        let lenient = IdentityPolicy::user_id_only().lenient();
        assert_eq!(builder.extract_identity(&lenient), Err(ApiError::MissingToken));
    }

    #[test]
    fn test_identity_is_idempotent() {
        let token = token_for(json!({"userId": "u-7", "id": "other"}));
        let builder = builder_with(Some(token.as_str()));
        let policy = IdentityPolicy::user_id_or_fallbacks();

        let first = builder.require_identity(&policy).unwrap();
        let second = builder.require_identity(&policy).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.field, IdentityField::UserId);
        assert_eq!(first.value, "u-7");
    }

    #[test]
    fn test_malformed_token_fails_identity() {
        let builder = builder_with(Some("opaque-session-id"));

        let result = builder.require_identity(&IdentityPolicy::user_id_only());
        assert!(matches!(result, Err(ApiError::MalformedToken(_))));
        // Header construction does not judge the token.
        assert_eq!(builder.build_headers().get(AUTHORIZATION), Some("Bearer opaque-session-id"));
    }

    #[test]
    fn test_lenient_policy_returns_none_without_claim() {
        let token = token_for(json!({"sub": "someone"}));
        let builder = builder_with(Some(token.as_str()));

        let result = builder.extract_identity(&IdentityPolicy::user_id_only().lenient());
        assert_eq!(result, Ok(None));
        assert!(builder.require_identity(&IdentityPolicy::user_id_only().lenient()).is_err());
    }
}
