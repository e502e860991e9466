//! Micropub client for creating and updating posts.
//!
//! Creates are form-encoded `h=entry` requests; updates use the JSON `action: update`
//! form with `replace` on `content` and `name`.

use crate::config::Config;
use crate::constants::DATE_FORMAT_ISO;
use crate::errors::{AppResult, MicropubError};
use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use reqwest::header::LOCATION;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info};

/// A new entry to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub content: String,
    /// `YYYY-MM-DDTHH:MM:00`
    pub published: String,
    pub slug: String,
    pub category: Option<String>,
}

impl NewEntry {
    /// Builds the entry for the post of `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use clippings::micropub::NewEntry;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
    /// let entry = NewEntry::for_date(date, "Title", "Body", "23:59", Some("Links"));
    ///
    /// assert_eq!(entry.published, "2026-01-17T23:59:00");
    /// assert_eq!(entry.slug, "links-2026-01-17");
    /// ```
    pub fn for_date(
        date: NaiveDate,
        name: &str,
        content: &str,
        publish_time: &str,
        category: Option<&str>,
    ) -> Self {
        let category = category.filter(|c| !c.is_empty());
        Self {
            name: name.to_string(),
            content: content.to_string(),
            published: published_at(date, publish_time),
            slug: slug_for(date, category),
            category: category.map(str::to_string),
        }
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![
            ("h", "entry"),
            ("name", self.name.as_str()),
            ("content", self.content.as_str()),
            ("published", self.published.as_str()),
            ("mp-slug", self.slug.as_str()),
        ];
        if let Some(category) = &self.category {
            form.push(("category", category.as_str()));
        }
        form
    }
}

/// `<lowercased category>-<YYYY-MM-DD>`, or just the date without a category.
pub fn slug_for(date: NaiveDate, category: Option<&str>) -> String {
    let date = date.format(DATE_FORMAT_ISO);
    match category.filter(|c| !c.is_empty()) {
        Some(category) => format!("{}-{}", category.to_lowercase(), date),
        None => date.to_string(),
    }
}

/// `<YYYY-MM-DD>T<HH:MM>:00`
pub fn published_at(date: NaiveDate, publish_time: &str) -> String {
    format!("{}T{}:00", date.format(DATE_FORMAT_ISO), publish_time)
}

/// Client for one Micropub endpoint.
pub struct MicropubClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl MicropubClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when `MICROBLOG_TOKEN` is not set.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            config.micropub_endpoint.clone(),
            config.microblog_token()?,
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Publishes a new entry.
    ///
    /// 201 and 202 are success; the `Location` header, when sent, is the new post's
    /// url and is returned for recording as `micropub_url`.
    pub fn create(&self, entry: &NewEntry) -> Result<Option<String>, MicropubError> {
        debug!(endpoint = %self.endpoint, slug = %entry.slug, "Micropub create");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .form(&entry.form())
            .send()
            .map_err(MicropubError::Http)?;

        match response.status() {
            StatusCode::CREATED | StatusCode::ACCEPTED => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string);
                info!(location = ?location, "Micropub entry created");
                Ok(location)
            }
            _ => Err(rejected(response)),
        }
    }

    /// Replaces the content and name of the post at `url`.
    ///
    /// 200 and 204 are success.
    pub fn update(&self, url: &str, name: &str, content: &str) -> Result<(), MicropubError> {
        debug!(endpoint = %self.endpoint, url, "Micropub update");

        let payload = json!({
            "action": "update",
            "url": url,
            "replace": {
                "content": [content],
                "name": [name],
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .map_err(MicropubError::Http)?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => {
                info!(url, "Micropub entry updated");
                Ok(())
            }
            _ => Err(rejected(response)),
        }
    }
}

fn rejected(response: Response) -> MicropubError {
    MicropubError::Rejected {
        status: response.status().as_u16(),
        body: response.text().unwrap_or_default(),
    }
}
