//! Member directory: cities, chapters, members and badges
//!
//! The dropdown lists and the unfiltered member snapshot are served from the
//! response cache while fresh.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::endpoints::{with_path_segment, with_query, DirectoryEndpoints};
use crate::api::{ApiClient, Envelope, ListPayload, Page, RequestBody, RequestConfig};
use crate::directory::models::{Badge, Chapter, City, Member, MemberQuery, MemberStats};
use crate::directory::validation::{self, MemberDraft, ValidationReport};
use crate::profile::models::UserProfile;
use crate::storage::ResponseCache;
use crate::types::ApiError;

pub const CITIES_CACHE_KEY: &str = "member_directory_cities";
pub const CHAPTERS_CACHE_KEY: &str = "member_directory_chapters";
pub const MEMBERS_CACHE_KEY: &str = "member_directory_members";

const DROPDOWN_LIMIT: u32 = 100;
const SNAPSHOT_LIMIT: u32 = 1000;

#[derive(Clone)]
pub struct MemberDirectoryService {
    client: ApiClient,
    endpoints: DirectoryEndpoints,
    cache: ResponseCache,
}

impl MemberDirectoryService {
    pub fn new(client: ApiClient, endpoints: DirectoryEndpoints, cache: ResponseCache) -> Self {
        Self {
            client,
            endpoints,
            cache,
        }
    }

    pub async fn cities(&self, page: u32, limit: u32) -> Result<Page<City>, ApiError> {
        let result = self.fetch_page(&self.endpoints.cities, &MemberQuery::page(page, limit)).await;
        self.client.reported(result, "Failed to fetch cities")
    }

    pub async fn chapters(&self, page: u32, limit: u32) -> Result<Page<Chapter>, ApiError> {
        let result =
            self.fetch_page(&self.endpoints.chapters, &MemberQuery::page(page, limit)).await;
        self.client.reported(result, "Failed to fetch chapters")
    }

    pub async fn members(&self, query: &MemberQuery) -> Result<Page<Member>, ApiError> {
        let result = self.fetch_page(&self.endpoints.members, query).await;
        self.client.reported(result, "Failed to fetch members")
    }

    pub async fn search_members(
        &self,
        keyword: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<Member>, ApiError> {
        let result = self.fetch_search(keyword, page, limit).await;
        self.client.reported(result, "Failed to search members")
    }

    /// Failures are logged without a toast.
    pub async fn user_badges(&self, user_id: &str) -> Result<Vec<Badge>, ApiError> {
        let result = self.fetch_badges(user_id).await;
        self.client.logged(result, &format!("Failed to fetch badges for user {}", user_id))
    }

    pub async fn user_details(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let result = self.fetch_user_details(user_id).await;
        self.client.reported(result, "Failed to fetch user details")
    }

    /// Every city, for dropdowns
    pub async fn all_cities(&self) -> Result<Vec<City>, ApiError> {
        if let Some(cities) = self.cache.get::<Vec<City>>(CITIES_CACHE_KEY) {
            log::debug!("Serving {} cities from cache", cities.len());
            return Ok(cities);
        }

        let cities = self.cities(1, DROPDOWN_LIMIT).await?.docs;
        self.remember(CITIES_CACHE_KEY, &cities);
        Ok(cities)
    }

    /// Every chapter, for dropdowns
    pub async fn all_chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        if let Some(chapters) = self.cache.get::<Vec<Chapter>>(CHAPTERS_CACHE_KEY) {
            log::debug!("Serving {} chapters from cache", chapters.len());
            return Ok(chapters);
        }

        let chapters = self.chapters(1, DROPDOWN_LIMIT).await?.docs;
        self.remember(CHAPTERS_CACHE_KEY, &chapters);
        Ok(chapters)
    }

    /// Unfiltered snapshot of the whole directory
    pub async fn all_members(&self) -> Result<Vec<Member>, ApiError> {
        if let Some(members) = self.cache.get::<Vec<Member>>(MEMBERS_CACHE_KEY) {
            log::debug!("Serving {} members from cache", members.len());
            return Ok(members);
        }

        let members = self.members(&MemberQuery::page(1, SNAPSHOT_LIMIT)).await?.docs;
        self.remember(MEMBERS_CACHE_KEY, &members);
        Ok(members)
    }

    pub async fn chapters_by_city(&self, city_name: &str) -> Result<Vec<Chapter>, ApiError> {
        let chapters = self.all_chapters().await?;
        Ok(chapters.into_iter().filter(|chapter| chapter.city_name == city_name).collect())
    }

    /// Directory totals; the three listings are fetched concurrently.
    pub async fn member_stats(&self) -> Result<MemberStats, ApiError> {
        let result = self.collect_stats().await;
        self.client.reported(result, "Failed to fetch statistics")
    }

    pub fn validate_member(&self, draft: &MemberDraft) -> ValidationReport {
        validation::validate_member(draft)
    }

    async fn collect_stats(&self) -> Result<MemberStats, ApiError> {
        let snapshot = MemberQuery::page(1, SNAPSHOT_LIMIT);
        let (members, cities, chapters) = tokio::try_join!(
            self.members(&snapshot),
            self.cities(1, DROPDOWN_LIMIT),
            self.chapters(1, DROPDOWN_LIMIT),
        )?;

        let mut members_by_city = BTreeMap::new();
        let mut members_by_chapter = BTreeMap::new();
        for member in &members.docs {
            if !member.city.is_empty() {
                *members_by_city.entry(member.city.clone()).or_insert(0) += 1;
            }
            if !member.chapter_name.is_empty() {
                *members_by_chapter.entry(member.chapter_name.clone()).or_insert(0) += 1;
            }
        }

        Ok(MemberStats {
            total_members: members.total_docs.unwrap_or(0),
            total_cities: cities.total_docs.unwrap_or(0),
            total_chapters: chapters.total_docs.unwrap_or(0),
            members_by_city,
            members_by_chapter,
        })
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &MemberQuery,
    ) -> Result<Page<T>, ApiError> {
        let url = with_query(endpoint, &query.query_pairs())?;
        self.get_decoded::<Page<T>>(&url).await
    }

    async fn fetch_search(&self, keyword: &str, page: u32, limit: u32) -> Result<Page<Member>, ApiError> {
        let url = with_query(
            &self.endpoints.search_members,
            &[
                ("keyword", keyword.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        self.get_decoded(&url).await
    }

    async fn fetch_badges(&self, user_id: &str) -> Result<Vec<Badge>, ApiError> {
        let url = with_path_segment(&self.endpoints.user_badges, user_id)?;
        let badges: ListPayload<Badge> = self.get_decoded(&url).await?;
        Ok(badges.into_items())
    }

    async fn fetch_user_details(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let url = with_path_segment(&self.endpoints.user_details, user_id)?;
        self.get_decoded(&url).await
    }

    async fn get_decoded<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let headers = self.client.builder().build_headers();
        let raw = self.client.send(RequestConfig::get(url), RequestBody::Empty, &headers).await?;
        Ok(Envelope::from_value(raw).decode::<T>()?.into_data())
    }

    fn remember<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value) {
            log::warn!("Could not cache '{}': {}", key, e);
        }
    }
}
