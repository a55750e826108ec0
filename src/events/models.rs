//! Event models

use serde::{Deserialize, Serialize};

use crate::api::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Event,
    Meeting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "event_or_meeting", default)]
    pub kind: Option<EventKind>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub mode: Option<EventMode>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<String>,
    #[serde(rename = "mapURL", default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "chapter_name", default, deserialize_with = "null_as_default")]
    pub chapter_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMedia {
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventGallery {
    #[serde(deserialize_with = "null_as_default")]
    pub event_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chapter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media: EventMedia,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fields_read_as_defaults() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e-1",
            "name": "Weekly Meet",
            "date": null,
            "photos": null,
            "chapter_name": null,
            "thumbnail": null
        }))
        .unwrap();
        assert_eq!(event.date, "");
        assert!(event.photos.is_empty());
        assert_eq!(event.chapter_name, "");
        assert!(event.thumbnail.is_none());

        let gallery: EventGallery =
            serde_json::from_value(json!({"eventId": "e-1", "location": null, "media": null}))
                .unwrap();
        assert_eq!(gallery.event_id, "e-1");
        assert_eq!(gallery.media, EventMedia::default());
    }
}
