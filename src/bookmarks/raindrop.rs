//! Raindrop.io REST client.
//!
//! Only the three read endpoints the clippings workflow needs are covered: the root
//! and nested collection listings, and a tag search within one collection.

use super::{filter_by_local_date, Bookmark, BookmarkSource, RaindropItem};
use crate::config::Config;
use crate::constants::RAINDROP_PAGE_SIZE;
use crate::errors::{AppResult, RaindropError};
use chrono::{Local, NaiveDate, TimeZone};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

/// A collection as listed by `/collections` and `/collections/childrens`.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct CollectionsResponse {
    #[serde(default)]
    items: Vec<Collection>,
}

#[derive(Debug, Deserialize)]
struct RaindropsResponse {
    #[serde(default)]
    items: Vec<RaindropItem>,
}

/// Client for the Raindrop.io API, bound to one collection and tag.
pub struct RaindropClient {
    base_url: String,
    token: String,
    collection_name: String,
    tag_filter: String,
    client: Client,
}

impl RaindropClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base, e.g. `https://api.raindrop.io/rest/v1`
    /// * `token` - bearer token
    /// * `collection_name` - collection to read, matched case-insensitively
    /// * `tag_filter` - tag without the leading `#`
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        collection_name: impl Into<String>,
        tag_filter: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            collection_name: collection_name.into(),
            tag_filter: tag_filter.into(),
            client: Client::new(),
        }
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when `RAINDROP_API_TOKEN` is not set.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            config.raindrop_api_base.clone(),
            config.raindrop_token()?,
            config.collection_name.clone(),
            config.tag_filter.clone(),
        ))
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, RaindropError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        debug!(endpoint, "Raindrop request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .map_err(RaindropError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RaindropError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        response.json().map_err(|e| {
            RaindropError::InvalidResponse(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }

    /// Resolves the configured collection name to its id.
    ///
    /// Root collections are checked first, then nested ones. Matching is a
    /// case-insensitive exact comparison of titles.
    ///
    /// # Errors
    ///
    /// Returns `RaindropError::CollectionNotFound` carrying every collection title
    /// seen when nothing matches, or a request error.
    pub fn find_collection_id(&self) -> Result<i64, RaindropError> {
        let wanted = self.collection_name.to_lowercase();
        let mut seen = Vec::new();

        for endpoint in ["/collections", "/collections/childrens"] {
            let listing: CollectionsResponse = self.get(endpoint, &[])?;
            if let Some(found) = listing
                .items
                .iter()
                .find(|c| c.title.to_lowercase() == wanted)
            {
                debug!(id = found.id, title = %found.title, "Resolved collection");
                return Ok(found.id);
            }
            seen.extend(listing.items.into_iter().map(|c| c.title));
        }

        Err(RaindropError::CollectionNotFound {
            name: self.collection_name.clone(),
            available: seen,
        })
    }

    /// Fetches the first page of items tagged with the configured tag.
    ///
    /// Only page zero is requested; anything past `RAINDROP_PAGE_SIZE` items is
    /// not seen.
    pub fn search_tagged(&self, collection_id: i64) -> Result<Vec<RaindropItem>, RaindropError> {
        let query = [
            ("search", format!("#{}", self.tag_filter)),
            ("perpage", RAINDROP_PAGE_SIZE.to_string()),
            ("page", "0".to_string()),
        ];
        let response: RaindropsResponse =
            self.get(&format!("/raindrops/{}", collection_id), &query)?;

        if response.items.len() as u32 >= RAINDROP_PAGE_SIZE {
            info!(
                page_size = RAINDROP_PAGE_SIZE,
                "Search returned a full page; older tagged items are not fetched"
            );
        }
        Ok(response.items)
    }

    /// Fetches the clippings for `date`, converting timestamps into `tz`.
    pub fn fetch_for_date_in<Tz: TimeZone>(
        &self,
        date: NaiveDate,
        tz: &Tz,
    ) -> AppResult<Vec<Bookmark>>
    where
        Tz::Offset: std::fmt::Display,
    {
        let collection_id = self.find_collection_id()?;
        let items = self.search_tagged(collection_id)?;
        let total = items.len();

        let bookmarks = filter_by_local_date(items, date, tz);
        info!(
            collection = %self.collection_name,
            tag = %self.tag_filter,
            fetched = total,
            matched = bookmarks.len(),
            "Fetched bookmarks"
        );
        Ok(bookmarks)
    }
}

impl BookmarkSource for RaindropClient {
    fn fetch_for_date(&self, date: NaiveDate) -> AppResult<Vec<Bookmark>> {
        self.fetch_for_date_in(date, &Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = RaindropClient::new("https://api.raindrop.io/rest/v1/", "t", "c", "x");
        assert_eq!(client.base_url, "https://api.raindrop.io/rest/v1");
    }

    #[test]
    fn test_collection_listing_tolerates_missing_titles() {
        let listing: CollectionsResponse =
            serde_json::from_str(r#"{"result": true, "items": [{"_id": 7}, {"_id": 8, "title": "Clippings"}]}"#)
                .unwrap();
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[0].title, "");
        assert_eq!(listing.items[1].id, 8);
    }
}
