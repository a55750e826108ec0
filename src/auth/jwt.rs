//! JWT payload decoding
//!
//! The client never verifies signatures; it only reads the payload segment
//! of the stored token to recover the acting user's identifier.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};
use std::fmt;

use crate::types::ApiError;

/// Accepts base64url with or without padding; standard-alphabet input is
/// mapped onto it before decoding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claim keys that may carry the user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    UserId,
    Id,
    UnderscoreId,
}

impl IdentityField {
    pub fn claim_name(self) -> &'static str {
        match self {
            IdentityField::UserId => "userId",
            IdentityField::Id => "id",
            IdentityField::UnderscoreId => "_id",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.claim_name())
    }
}

/// What to do when none of the preferred claims is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingClaim {
    Fail,
    Absent,
}

/// Ordered claim preference declared by each call site.
///
/// Event listings read only `userId`; profile calls fall back to `id` and
/// then `_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPolicy {
    pub fields: Vec<IdentityField>,
    pub on_missing: MissingClaim,
}

impl IdentityPolicy {
    pub fn new(fields: Vec<IdentityField>, on_missing: MissingClaim) -> Self {
        Self {
            fields,
            on_missing,
        }
    }

    pub fn user_id_only() -> Self {
        Self::new(vec![IdentityField::UserId], MissingClaim::Fail)
    }

    pub fn user_id_or_fallbacks() -> Self {
        Self::new(
            vec![IdentityField::UserId, IdentityField::Id, IdentityField::UnderscoreId],
            MissingClaim::Fail,
        )
    }

    pub fn lenient(self) -> Self {
        Self {
            on_missing: MissingClaim::Absent,
            ..self
        }
    }

    /// Pick the first present claim in preference order
    pub fn resolve(&self, claims: &TokenClaims) -> Result<Option<IdentityClaim>, ApiError> {
        let found = self.fields.iter().find_map(|field| {
            claims.identifier(*field).map(|value| IdentityClaim {
                field: *field,
                value,
            })
        });

        match (found, self.on_missing) {
            (Some(claim), _) => Ok(Some(claim)),
            (None, MissingClaim::Absent) => Ok(None),
            (None, MissingClaim::Fail) => {
                let names: Vec<&str> = self.fields.iter().map(|f| f.claim_name()).collect();
                Err(ApiError::MalformedToken(format!(
                    "token payload has none of: {}",
                    names.join(", ")
                )))
            },
        }
    }
}

/// Identifier recovered from the token payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub field: IdentityField,
    pub value: String,
}

/// Decoded payload segment of a compact JWT
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    claims: Map<String, Value>,
}

impl TokenClaims {
    /// Decode the middle segment of `token`
    pub fn decode(token: &str) -> Result<Self, ApiError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(ApiError::MalformedToken(format!(
                "expected 3 dot-delimited segments, found {}",
                segments.len()
            )));
        }

        let normalized = segments[1].trim().replace('+', "-").replace('/', "_");
        let bytes = PAYLOAD_ENGINE
            .decode(normalized.as_bytes())
            .map_err(|e| ApiError::MalformedToken(format!("payload is not base64: {}", e)))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(claims)) => Ok(Self {
                claims,
            }),
            Ok(_) => Err(ApiError::MalformedToken("payload is not a JSON object".to_string())),
            Err(e) => Err(ApiError::MalformedToken(format!("payload is not JSON: {}", e))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Identifier under `field`; non-empty strings and numbers count as present.
    pub fn identifier(&self, field: IdentityField) -> Option<String> {
        match self.claims.get(field.claim_name())? {
            Value::String(value) if !value.is_empty() => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            _ => None,
        }
    }
}
