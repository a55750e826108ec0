//! Signed-in member's own profile
//!
//! Successful calls refresh the `userData` entry so screens can render the
//! profile without another round trip.

use serde_json::Value;
use std::sync::Arc;

use crate::api::endpoints::{with_path_segment, ProfileEndpoints};
use crate::api::{response_message, unwrap_payload, ApiClient, FilePart, RequestBody, RequestConfig};
use crate::auth::{IdentityPolicy, USER_DATA_KEY};
use crate::notify::ToastKind;
use crate::profile::models::UserProfile;
use crate::storage::KeyValueStore;
use crate::types::ApiError;

pub const PROFILE_PIC_FIELD: &str = "profilePic";

#[derive(Clone)]
pub struct ProfileService {
    client: ApiClient,
    endpoints: ProfileEndpoints,
    store: Arc<dyn KeyValueStore>,
}

impl ProfileService {
    pub fn new(client: ApiClient, endpoints: ProfileEndpoints, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client,
            endpoints,
            store,
        }
    }

    pub async fn user_profile(&self) -> Result<UserProfile, ApiError> {
        let result = self.fetch_profile().await;
        self.client.reported(result, "Failed to fetch profile")
    }

    /// Send a partial profile; answers with the updated profile.
    pub async fn update_user_profile(&self, changes: &Value) -> Result<UserProfile, ApiError> {
        let result = self.put_profile(changes).await;
        self.client.reported(result, "Failed to update profile")
    }

    /// Upload a new picture; the part is always sent as `profilePic`.
    /// Yields the new picture URL when the backend reports one.
    pub async fn upload_profile_picture(&self, file: FilePart) -> Result<Option<String>, ApiError> {
        let result = self.put_picture(file).await;
        self.client.reported(result, "Failed to upload profile picture")
    }

    pub async fn delete_user_account(&self) -> Result<(), ApiError> {
        let result = self.delete_account().await;
        self.client.reported(result, "Failed to delete account")
    }

    /// Profile kept from the last successful call.
    ///
    /// Accepts either a stored object or a JSON string. Anything unreadable
    /// is cleared.
    pub fn profile_from_storage(&self) -> Option<UserProfile> {
        let stored = self.store.get(USER_DATA_KEY)?;

        let parsed = match stored {
            Value::Null => return None,
            Value::String(text) => serde_json::from_str::<UserProfile>(&text),
            other => serde_json::from_value::<UserProfile>(other),
        };

        match parsed {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Stored user data is unreadable, clearing it: {}", e);
                if let Err(e) = self.store.clear_key(USER_DATA_KEY) {
                    log::warn!("Could not clear '{}': {}", USER_DATA_KEY, e);
                }
                None
            },
        }
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let headers = self.client.builder().build_headers();
        let url = self.user_url(&self.endpoints.user_profile)?;

        let raw = self.client.send(RequestConfig::get(url), RequestBody::Empty, &headers).await?;
        let message = success_message(&raw, "Profile fetched successfully");
        let data = unwrap_payload(raw);

        let profile = serde_json::from_value::<UserProfile>(data.clone())?;
        self.remember(data);
        self.client.notify(&message, ToastKind::Success);
        Ok(profile)
    }

    async fn put_profile(&self, changes: &Value) -> Result<UserProfile, ApiError> {
        let headers = self.client.builder().build_headers();
        let url = self.user_url(&self.endpoints.update_user_profile)?;

        let raw = self
            .client
            .send(RequestConfig::put(url), RequestBody::Json(changes.clone()), &headers)
            .await?;
        let message = success_message(&raw, "Profile updated successfully");
        let updated = updated_user(raw);

        let profile = serde_json::from_value::<UserProfile>(updated.clone())?;
        self.remember(updated);
        self.client.notify(&message, ToastKind::Success);
        Ok(profile)
    }

    async fn put_picture(&self, mut file: FilePart) -> Result<Option<String>, ApiError> {
        let headers = self.client.builder().build_upload_headers();
        let url = self.user_url(&self.endpoints.upload_profile_pic)?;
        file.field = PROFILE_PIC_FIELD.to_string();

        let raw = self
            .client
            .send(RequestConfig::put(url), RequestBody::Multipart(vec![file]), &headers)
            .await?;
        let message = success_message(&raw, "Profile picture uploaded successfully");
        let updated = updated_user(raw);

        let picture = updated.get(PROFILE_PIC_FIELD).and_then(Value::as_str).map(str::to_string);
        if updated.is_object() {
            self.remember(updated);
        }
        self.client.notify(&message, ToastKind::Success);
        Ok(picture)
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        let headers = self.client.builder().build_headers();
        let url = self.user_url(&self.endpoints.delete_account)?;

        let raw =
            self.client.send(RequestConfig::delete(url), RequestBody::Empty, &headers).await?;

        self.client.notify(&success_message(&raw, "Account deleted successfully"), ToastKind::Success);
        Ok(())
    }

    fn user_url(&self, endpoint: &str) -> Result<String, ApiError> {
        let identity =
            self.client.builder().require_identity(&IdentityPolicy::user_id_or_fallbacks())?;
        with_path_segment(endpoint, &identity.value)
    }

    fn remember(&self, profile: Value) {
        if let Err(e) = self.store.set(USER_DATA_KEY, profile) {
            log::warn!("Could not store user data: {}", e);
        }
    }
}

fn success_message(raw: &Value, fallback: &str) -> String {
    response_message(raw).unwrap_or(fallback).to_string()
}

/// `updatedUser` when the backend sends it, otherwise the usual payload
fn updated_user(mut raw: Value) -> Value {
    match raw.get_mut("updatedUser").map(Value::take) {
        Some(user) if !user.is_null() => user,
        _ => unwrap_payload(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoints;
    use crate::auth::headers::CONTENT_TYPE;
    use crate::auth::TokenStore;
    use crate::mocks::{MockTransport, RecordingNotifier};
    use crate::storage::MemoryStore;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token_for(claims: Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"portal-test-secret"))
            .unwrap()
    }

    struct Fixture {
        service: ProfileService,
        transport: MockTransport,
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture(claims: Value) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenStore::new(store.clone());
        tokens.set(token_for(claims)).unwrap();

        let transport = MockTransport::new();
        let notifier = Arc::new(RecordingNotifier::new());
        let client = ApiClient::new(Arc::new(transport.clone()), tokens, notifier.clone());
        let endpoints = Endpoints::new("https://portal.test", "mobile").profile;

        Fixture {
            service: ProfileService::new(client, endpoints, store.clone()),
            transport,
            store,
            notifier,
        }
    }

    #[tokio::test]
    async fn test_user_profile_falls_back_to_id_claim() {
        let f = fixture(json!({"id": "u-7"}));
        f.transport.push_response(Ok(json!({
            "success": true,
            "message": "",
            "data": {"_id": "u-7", "name": "Asha", "city": "Surat"}
        })));

        let profile = f.service.user_profile().await.unwrap();

        assert_eq!(profile.name, "Asha");
        let call = f.transport.last_call().unwrap();
        assert_eq!(call.config, RequestConfig::get("https://portal.test/mobile/get-users/u-7"));
        assert_eq!(
            f.notifier.toasts(),
            vec![("Profile fetched successfully".to_string(), ToastKind::Success)]
        );

        // Stored as an object, the same shape update and upload write.
        let stored = f.store.get(USER_DATA_KEY).unwrap();
        assert_eq!(stored, json!({"_id": "u-7", "name": "Asha", "city": "Surat"}));
        assert_eq!(f.service.profile_from_storage(), Some(profile));
    }

    #[tokio::test]
    async fn test_user_id_claim_wins_over_fallbacks() {
        let f = fixture(json!({"userId": "primary", "id": "secondary", "_id": "third"}));
        f.transport.push_response(Ok(json!({"data": {"_id": "primary"}})));

        f.service.user_profile().await.unwrap();

        assert!(f.transport.last_call().unwrap().config.url.ends_with("/get-users/primary"));
    }

    #[tokio::test]
    async fn test_update_prefers_updated_user() {
        let f = fixture(json!({"userId": "u-1"}));
        f.transport.push_response(Ok(json!({
            "message": "Saved",
            "updatedUser": {"_id": "u-1", "name": "Asha P"},
            "data": {"_id": "u-1", "name": "stale"}
        })));

        let changes = json!({"name": "Asha P"});
        let profile = f.service.update_user_profile(&changes).await.unwrap();

        assert_eq!(profile.name, "Asha P");
        let call = f.transport.last_call().unwrap();
        assert_eq!(call.config, RequestConfig::put("https://portal.test/mobile/update-User/u-1"));
        assert_eq!(call.body, RequestBody::Json(changes));
        assert_eq!(f.store.get(USER_DATA_KEY), Some(json!({"_id": "u-1", "name": "Asha P"})));
        assert_eq!(f.notifier.last(), Some(("Saved".to_string(), ToastKind::Success)));
    }

    #[tokio::test]
    async fn test_upload_strips_content_type() {
        let f = fixture(json!({"userId": "u-1"}));
        f.transport.push_response(Ok(json!({
            "data": {"_id": "u-1", "profilePic": "https://cdn.example/u-1.jpg"}
        })));

        let file = FilePart::new("file", "me.jpg", vec![1, 2, 3]).with_mime_type("image/jpeg");
        let picture = f.service.upload_profile_picture(file).await.unwrap();

        assert_eq!(picture.as_deref(), Some("https://cdn.example/u-1.jpg"));
        let call = f.transport.last_call().unwrap();
        assert!(call.headers.contains("Authorization"));
        assert!(!call.headers.contains(CONTENT_TYPE));
        match call.body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 1);
                assert_eq!(parts[0].field, PROFILE_PIC_FIELD);
                assert_eq!(parts[0].file_name, "me.jpg");
            },
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_account() {
        let f = fixture(json!({"userId": "u-1"}));
        f.transport.push_response(Ok(json!({"success": true, "message": "Account removed"})));

        f.service.delete_user_account().await.unwrap();

        assert_eq!(
            f.transport.last_call().unwrap().config,
            RequestConfig::delete("https://portal.test/mobile/getPointsHistory1/u-1")
        );
        assert_eq!(f.notifier.last(), Some(("Account removed".to_string(), ToastKind::Success)));
    }

    #[tokio::test]
    async fn test_profile_without_identity_fails_before_network() {
        let f = fixture(json!({"role": "member"}));

        let result = f.service.user_profile().await;

        assert!(matches!(result, Err(ApiError::MalformedToken(_))));
        assert_eq!(f.transport.call_count(), 0);
        assert_eq!(f.notifier.last().map(|(_, kind)| kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_profile_from_storage_accepts_object_and_clears_garbage() {
        let f = fixture(json!({"userId": "u-1"}));
        assert_eq!(f.service.profile_from_storage(), None);

        f.store.set(USER_DATA_KEY, json!({"_id": "u-1", "name": "Asha"})).unwrap();
        assert_eq!(f.service.profile_from_storage().map(|p| p.name), Some("Asha".to_string()));

        f.store.set(USER_DATA_KEY, json!("{not json")).unwrap();
        assert_eq!(f.service.profile_from_storage(), None);
        assert_eq!(f.store.get(USER_DATA_KEY), None);
    }
}
