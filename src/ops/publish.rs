//! Publish or update the post for a date.

use crate::config::Config;
use crate::errors::{AppResult, MicropubError, PostError};
use crate::micropub::{MicropubClient, NewEntry};
use crate::post::PostDocument;
use crate::store::PostStore;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Result of a publish run.
///
/// Endpoint failures land in `Failed` instead of an error so `main` can give them
/// their own exit code.
#[derive(Debug)]
pub enum PublishOutcome {
    /// A new entry was created. `location` is `None` when the endpoint sent no
    /// `Location` header, in which case nothing was recorded locally.
    Created {
        title: String,
        link_count: usize,
        location: Option<String>,
    },
    /// The entry at `url` was replaced.
    Updated {
        title: String,
        link_count: usize,
        url: String,
    },
    /// The endpoint rejected the request or could not be reached. The local file is
    /// unchanged.
    Failed { error: MicropubError },
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, PublishOutcome::Failed { .. })
    }
}

/// Reads the draft for `date`, checking it has something to publish.
///
/// # Errors
///
/// Returns `PostError::NoDraft` when there is no file for `date`,
/// `PostError::EmptyBody` when it has no body, or an I/O error from reading it.
pub fn read_draft(store: &PostStore, date: NaiveDate) -> AppResult<PostDocument> {
    let path = store.path_for(date);
    let doc = store
        .read(date)?
        .ok_or_else(|| PostError::NoDraft { path: path.clone() })?;

    if doc.body.trim().is_empty() {
        return Err(PostError::EmptyBody { path }.into());
    }
    Ok(doc)
}

/// Sends the stored post for `date` to the Micropub endpoint.
///
/// See [`publish_draft`].
pub fn publish(
    config: &Config,
    client: &MicropubClient,
    store: &PostStore,
    date: NaiveDate,
) -> AppResult<PublishOutcome> {
    let doc = read_draft(store, date)?;
    publish_draft(config, client, store, date, &doc)
}

/// Sends `doc`, the draft for `date`, to the Micropub endpoint.
///
/// A post with a recorded `micropub_url` is updated in place; otherwise a new entry
/// is created and the returned location saved into the frontmatter.
///
/// # Errors
///
/// Returns `AppError::Config` when `PUBLISH_TIME` is not `HH:MM` and a new entry is
/// needed, or an I/O error from saving the location.
pub fn publish_draft(
    config: &Config,
    client: &MicropubClient,
    store: &PostStore,
    date: NaiveDate,
    doc: &PostDocument,
) -> AppResult<PublishOutcome> {
    let title = doc.title_or_default(date);
    let link_count = doc.links().len();

    if let Some(url) = doc.micropub_url() {
        info!(%date, url, links = link_count, "Updating existing post");
        return Ok(match client.update(url, &title, &doc.body) {
            Ok(()) => PublishOutcome::Updated {
                title,
                link_count,
                url: url.to_string(),
            },
            Err(error) => {
                warn!(%date, %error, "Update failed");
                PublishOutcome::Failed { error }
            }
        });
    }

    let publish_time = config.checked_publish_time()?;
    info!(%date, links = link_count, endpoint = client.endpoint(), "Publishing new post");
    let entry = NewEntry::for_date(
        date,
        &title,
        &doc.body,
        publish_time,
        config.post_category.as_deref(),
    );

    match client.create(&entry) {
        Ok(location) => {
            if let Some(location) = &location {
                store.save_micropub_url(date, location)?;
            }
            Ok(PublishOutcome::Created {
                title,
                link_count,
                location,
            })
        }
        Err(error) => {
            warn!(%date, %error, "Publish failed");
            Ok(PublishOutcome::Failed { error })
        }
    }
}
