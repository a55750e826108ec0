//! Endpoint URLs
//!
//! Routes under `{base}/{route}` are the app API; directory routes live
//! directly under `{base}`.

use reqwest::Url;

use crate::types::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEndpoints {
    pub upcoming_events: String,
    pub recent_events: String,
    pub event_gallery: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEndpoints {
    pub user_profile: String,
    pub update_user_profile: String,
    pub upload_profile_pic: String,
    pub delete_account: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEndpoints {
    pub cities: String,
    pub chapters: String,
    pub members: String,
    pub user_badges: String,
    pub user_details: String,
    pub search_members: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub events: EventEndpoints,
    pub profile: ProfileEndpoints,
    pub directory: DirectoryEndpoints,
}

impl Endpoints {
    pub fn new(base_url: &str, route: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let path = format!("{}/{}", base, route.trim_matches('/'));

        Self {
            events: EventEndpoints {
                upcoming_events: format!("{}/getAllUpcomingEvents", path),
                recent_events: format!("{}/getAllRecentEvents", path),
                event_gallery: format!("{}/getEventGallery", path),
            },
            profile: ProfileEndpoints {
                user_profile: format!("{}/get-users", path),
                update_user_profile: format!("{}/update-User", path),
                upload_profile_pic: format!("{}/update-User", path),
                // The backend exposes account deletion on this route.
                delete_account: format!("{}/getPointsHistory1", path),
            },
            directory: DirectoryEndpoints {
                cities: format!("{}/admin/getCities", base),
                chapters: format!("{}/admin/getChapters", base),
                members: format!("{}/mobile/get-users-comman-data", base),
                user_badges: format!("{}/admin/getUserBadges", base),
                user_details: format!("{}/mobile/get-users", base),
                search_members: format!("{}/mobile/search-users", base),
            },
        }
    }
}

/// `{endpoint}/{id}` with the id percent-encoded as a path segment
pub fn with_path_segment(endpoint: &str, id: &str) -> Result<String, ApiError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ApiError::config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    url.path_segments_mut()
        .map_err(|_| ApiError::config(format!("Endpoint '{}' can't take a path segment", endpoint)))?
        .pop_if_empty()
        .push(id);

    Ok(url.to_string())
}

/// `endpoint?k=v&...` with form encoding; no `?` when there are no pairs
pub fn with_query(endpoint: &str, pairs: &[(&str, String)]) -> Result<String, ApiError> {
    if pairs.is_empty() {
        return Ok(endpoint.to_string());
    }

    Url::parse_with_params(endpoint, pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .map(|url| url.to_string())
        .map_err(|e| ApiError::config(format!("Invalid endpoint '{}': {}", endpoint, e)))
}
