//! Response envelope normalization
//!
//! The backend answers either `{success, message, data}` or the payload at
//! the top level (flat pagination objects, bare arrays). Callers go through
//! [`Envelope`] rather than checking for both shapes themselves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Wrapped {
        success: Option<bool>,
        message: Option<String>,
        data: T,
    },
    Flat(T),
}

impl Envelope<Value> {
    /// Classify a raw reply; a `data` key holding `null` counts as absent.
    pub fn from_value(raw: Value) -> Self {
        let has_data = raw.get("data").is_some_and(|data| !data.is_null());
        if !has_data {
            return Envelope::Flat(raw);
        }

        match raw {
            Value::Object(mut map) => {
                let data = map.remove("data").unwrap_or(Value::Null);
                Envelope::Wrapped {
                    success: map.get("success").and_then(Value::as_bool),
                    message: map.get("message").and_then(Value::as_str).map(str::to_string),
                    data,
                }
            },
            other => Envelope::Flat(other),
        }
    }

    /// Deserialize the payload into `T`, keeping the envelope metadata
    pub fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        Ok(match self {
            Envelope::Wrapped {
                success,
                message,
                data,
            } => Envelope::Wrapped {
                success,
                message,
                data: serde_json::from_value(data)?,
            },
            Envelope::Flat(data) => Envelope::Flat(serde_json::from_value(data)?),
        })
    }
}

impl<T> Envelope<T> {
    pub fn data(&self) -> &T {
        match self {
            Envelope::Wrapped {
                data,
                ..
            } => data,
            Envelope::Flat(data) => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Envelope::Wrapped {
                data,
                ..
            } => data,
            Envelope::Flat(data) => data,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Wrapped {
                message,
                ..
            } => message.as_deref(),
            Envelope::Flat(_) => None,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, Envelope::Wrapped { .. })
    }
}

/// `raw.data` when present, otherwise `raw` itself
pub fn unwrap_payload(raw: Value) -> Value {
    Envelope::from_value(raw).into_data()
}

/// Top-level `message` of a raw reply, if it is a non-empty string
pub fn response_message(raw: &Value) -> Option<&str> {
    raw.get("message").and_then(Value::as_str).filter(|m| !m.trim().is_empty())
}

/// Field deserializer that reads an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers missing keys; the backend also sends
/// `null` for blank fields.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paginated list as returned by the directory endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default", bound(deserialize = "T: Deserialize<'de>"))]
    pub docs: Vec<T>,
    #[serde(default)]
    pub total_docs: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub paging_counter: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_prev_page: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_next_page: bool,
    #[serde(default)]
    pub prev_page: Option<u64>,
    #[serde(default)]
    pub next_page: Option<u64>,
}

impl<T> Page<T> {
    /// `totalDocs` when reported, otherwise the number of docs on this page
    pub fn total(&self) -> u64 {
        self.total_docs.unwrap_or(self.docs.len() as u64)
    }
}

/// List payload that is either a bare array or a paginated object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Items(Vec<T>),
    Paged(Page<T>),
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Items(items) => items,
            ListPayload::Paged(page) => page.docs,
        }
    }
}
