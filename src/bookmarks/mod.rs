//! Bookmarks and the client-side date filter.
//!
//! Bookmarks are fetched fresh on every draft run and never stored on their own. The
//! Raindrop search returns everything carrying the clippings tag; this module narrows
//! that down to the items created on one local calendar date.

pub mod raindrop;

use crate::constants::{DATE_FORMAT_ISO, UNTITLED_BOOKMARK};
use crate::errors::AppResult;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer};

pub use raindrop::RaindropClient;

/// A highlight captured on a bookmarked page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Highlight {
    /// Highlighted passage.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Personal note attached to the highlight.
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
}

/// A bookmark as rendered into a clippings post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub note: String,
    pub highlights: Vec<Highlight>,
    /// Creation timestamp exactly as the service returned it.
    pub created: String,
}

/// A raw item from the Raindrop search endpoint.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaindropItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub created: Option<String>,
}

// Raindrop sends `null` for cleared fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<RaindropItem> for Bookmark {
    fn from(item: RaindropItem) -> Self {
        Bookmark {
            title: item
                .title
                .unwrap_or_else(|| UNTITLED_BOOKMARK.to_string()),
            url: item.link.unwrap_or_default(),
            excerpt: item.excerpt.unwrap_or_default(),
            note: item.note.unwrap_or_default(),
            highlights: item.highlights,
            created: item.created.unwrap_or_default(),
        }
    }
}

/// Anything that can supply the bookmarks for one date.
///
/// The draft operation depends on this trait rather than on the HTTP client so it
/// can run against canned data.
pub trait BookmarkSource {
    /// Returns the clippings created on `date` in the host's local time zone.
    fn fetch_for_date(&self, date: NaiveDate) -> AppResult<Vec<Bookmark>>;
}

/// Calendar date (`YYYY-MM-DD`) of a service timestamp in the zone `tz`.
///
/// Falls back to the first ten characters of the raw value when it is not RFC 3339.
///
/// # Examples
///
/// ```
/// use chrono::FixedOffset;
/// use clippings::bookmarks::local_date_of;
///
/// let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
/// assert_eq!(local_date_of("2026-01-17T23:30:00.000Z", &new_york), "2026-01-17");
/// assert_eq!(local_date_of("2026-01-17T03:00:00.000Z", &new_york), "2026-01-16");
/// assert_eq!(local_date_of("2026-01-17 sometime", &new_york), "2026-01-17");
/// ```
pub fn local_date_of<Tz: TimeZone>(created: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(created) {
        Ok(parsed) => parsed
            .with_timezone(tz)
            .format(DATE_FORMAT_ISO)
            .to_string(),
        Err(_) => created.chars().take(10).collect(),
    }
}

/// Keeps the items whose local creation date equals `target`, in service order.
///
/// Items without a creation timestamp are dropped.
pub fn filter_by_local_date<Tz: TimeZone>(
    items: Vec<RaindropItem>,
    target: NaiveDate,
    tz: &Tz,
) -> Vec<Bookmark>
where
    Tz::Offset: std::fmt::Display,
{
    let target = target.format(DATE_FORMAT_ISO).to_string();

    items
        .into_iter()
        .filter(|item| match item.created.as_deref() {
            Some(created) if !created.is_empty() => local_date_of(created, tz) == target,
            _ => false,
        })
        .map(Bookmark::from)
        .collect()
}
