//! Create or regenerate the local post for a date.

use crate::bookmarks::BookmarkSource;
use crate::config::Config;
use crate::errors::AppResult;
use crate::post::PostDocument;
use crate::store::PostStore;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

/// Result of a draft run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    /// The post file was created or overwritten.
    Written {
        path: PathBuf,
        link_count: usize,
        /// Links in the file that was replaced; `None` for a new post.
        previous_link_count: Option<usize>,
    },
    /// No bookmarks matched the date; nothing on disk was touched.
    NothingToWrite,
}

/// Renders the post for `date` from freshly fetched bookmarks.
///
/// The body is rebuilt from scratch every time. When a post already exists its
/// `micropub_url` is carried into the new file so later publishes update rather than
/// duplicate.
///
/// # Errors
///
/// Returns an error if fetching fails or the file cannot be read or written.
pub fn draft(
    config: &Config,
    source: &dyn BookmarkSource,
    store: &PostStore,
    date: NaiveDate,
) -> AppResult<DraftOutcome> {
    let bookmarks = source.fetch_for_date(date)?;

    let Some(mut doc) = PostDocument::render(date, &bookmarks, config.post_category.as_deref(), None)
    else {
        info!(%date, "No bookmarks for date");
        return Ok(DraftOutcome::NothingToWrite);
    };

    let previous = store.read(date)?;
    if let Some(url) = previous.as_ref().and_then(PostDocument::micropub_url) {
        doc.set_micropub_url(url);
    }
    let previous_link_count = previous.as_ref().map(|p| p.links().len());

    store.ensure_content_dir()?;
    let path = store.write(date, &doc)?;

    info!(
        %date,
        links = bookmarks.len(),
        previous_links = ?previous_link_count,
        "Draft written"
    );
    Ok(DraftOutcome::Written {
        path,
        link_count: bookmarks.len(),
        previous_link_count,
    })
}
