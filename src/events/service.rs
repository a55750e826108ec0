//! Event listings and galleries

use serde_json::json;

use crate::api::endpoints::EventEndpoints;
use crate::api::{ApiClient, Envelope, ListPayload, RequestBody, RequestConfig};
use crate::auth::IdentityPolicy;
use crate::events::models::{Event, EventGallery};
use crate::types::ApiError;

#[derive(Clone)]
pub struct EventService {
    client: ApiClient,
    endpoints: EventEndpoints,
}

impl EventService {
    pub fn new(client: ApiClient, endpoints: EventEndpoints) -> Self {
        Self {
            client,
            endpoints,
        }
    }

    /// Upcoming events visible to the signed-in member
    pub async fn upcoming_events(&self) -> Result<Vec<Event>, ApiError> {
        let result = self.events_for_user(&self.endpoints.upcoming_events).await;
        self.client.reported(result, "Failed to fetch upcoming events")
    }

    /// Recently held events visible to the signed-in member
    pub async fn recent_events(&self) -> Result<Vec<Event>, ApiError> {
        let result = self.events_for_user(&self.endpoints.recent_events).await;
        self.client.reported(result, "Failed to fetch recent events")
    }

    pub async fn event_gallery(&self, event_id: &str) -> Result<EventGallery, ApiError> {
        let result = self.fetch_gallery(event_id).await;
        self.client.reported(result, "Failed to fetch event gallery")
    }

    async fn events_for_user(&self, url: &str) -> Result<Vec<Event>, ApiError> {
        let headers = self.client.builder().build_headers();
        let identity = self.client.builder().require_identity(&IdentityPolicy::user_id_only())?;

        let raw = self
            .client
            .send(
                RequestConfig::post(url),
                RequestBody::Json(json!({ "userId": identity.value })),
                &headers,
            )
            .await?;

        let events = Envelope::from_value(raw).decode::<ListPayload<Event>>()?.into_data();
        Ok(events.into_items())
    }

    async fn fetch_gallery(&self, event_id: &str) -> Result<EventGallery, ApiError> {
        let headers = self.client.builder().build_headers();

        let raw = self
            .client
            .send(
                RequestConfig::post(&self.endpoints.event_gallery),
                RequestBody::Json(json!({ "eventId": event_id })),
                &headers,
            )
            .await?;

        Ok(Envelope::from_value(raw).decode::<EventGallery>()?.into_data())
    }
}
