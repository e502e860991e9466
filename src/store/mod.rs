//! One markdown file per date under the content directory.
//!
//! Writes overwrite the whole file in place. There is no locking, so two runs for the
//! same date at once may interleave.

use crate::constants::{DATE_FORMAT_ISO, POST_FILE_EXTENSION};
use crate::errors::{AppError, AppResult, PostError};
use crate::post::{with_micropub_url, PostDocument};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Local post files keyed by calendar date.
#[derive(Debug, Clone)]
pub struct PostStore {
    content_dir: PathBuf,
}

impl PostStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// `<content_dir>/<YYYY-MM-DD>.md`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.content_dir.join(format!(
            "{}{}",
            date.format(DATE_FORMAT_ISO),
            POST_FILE_EXTENSION
        ))
    }

    /// Creates the content directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the directory cannot be created.
    pub fn ensure_content_dir(&self) -> AppResult<()> {
        if !self.content_dir.exists() {
            fs::create_dir_all(&self.content_dir).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create content directory {}: {}",
                        self.content_dir.display(),
                        e
                    ),
                ))
            })?;
            info!(path = %self.content_dir.display(), "Created content directory");
        }
        Ok(())
    }

    pub fn exists(&self, date: NaiveDate) -> bool {
        self.path_for(date).is_file()
    }

    /// Reads and parses the post for `date`; `Ok(None)` when there is no file.
    pub fn read(&self, date: NaiveDate) -> AppResult<Option<PostDocument>> {
        let path = self.path_for(date);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        debug!(path = %path.display(), bytes = content.len(), "Read post");
        Ok(Some(PostDocument::parse(&content)))
    }

    /// Writes `doc` as the post for `date`, replacing any existing file.
    pub fn write(&self, date: NaiveDate, doc: &PostDocument) -> AppResult<PathBuf> {
        let path = self.path_for(date);
        fs::write(&path, doc.to_file_content())?;
        info!(path = %path.display(), "Wrote post");
        Ok(path)
    }

    /// Records `url` as the post's `micropub_url`.
    ///
    /// Only the `micropub_url` line changes; hand edits elsewhere in the file are kept
    /// byte for byte.
    ///
    /// # Errors
    ///
    /// Returns `PostError::NoDraft` if the file has gone missing.
    pub fn save_micropub_url(&self, date: NaiveDate, url: &str) -> AppResult<()> {
        let path = self.path_for(date);
        if !path.is_file() {
            return Err(PostError::NoDraft { path }.into());
        }
        let content = fs::read_to_string(&path)?;
        fs::write(&path, with_micropub_url(&content, url))?;
        debug!(path = %path.display(), url, "Saved micropub_url");
        Ok(())
    }
}
