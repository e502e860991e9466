//! Error handling utilities for the clippings application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Publish failures are not part of `AppError`. A rejected create or update is
//! reported through [`crate::ops::PublishOutcome::Failed`] carrying a
//! [`MicropubError`], never raised.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// # Examples
///
/// ```
/// use clippings::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The `EDITOR` value could not be split into a command line.
    #[error("Could not parse editor command '{command}'. Check the quoting in $EDITOR.")]
    InvalidCommand {
        /// The raw editor setting
        command: String,
    },
}

/// Errors raised while talking to the Raindrop.io API.
///
/// All of these end the draft run; there are no retries.
///
/// # Examples
///
/// ```
/// use clippings::errors::RaindropError;
///
/// let error = RaindropError::CollectionNotFound {
///     name: "Clippings".to_string(),
///     available: vec!["Reading".to_string(), "Recipes".to_string()],
/// };
/// let message = format!("{}", error);
/// assert!(message.contains("'Clippings' not found"));
/// assert!(message.contains("  - Recipes"));
/// ```
#[derive(Debug, Error)]
pub enum RaindropError {
    /// The request never produced a response.
    #[error("Raindrop request failed: {0}. Check your network connection.")]
    Http(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Raindrop API returned HTTP {status} for {endpoint}: {body}")]
    Status {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Invalid response from Raindrop: {0}")]
    InvalidResponse(String),

    /// No collection carries the configured name.
    #[error("Collection '{name}' not found\nAvailable collections:\n{}", bullet_list(.available))]
    CollectionNotFound {
        /// Configured collection name
        name: String,
        /// Titles of every collection the account has
        available: Vec<String>,
    },
}

/// Errors from the Micropub endpoint.
///
/// These never propagate as `AppError`; the publish operation captures them.
#[derive(Debug, Error)]
pub enum MicropubError {
    /// The request never produced a response.
    #[error("Micropub request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The endpoint answered with a status outside the accepted set.
    #[error("Micropub endpoint returned HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
}

/// Problems with the local draft when publishing.
#[derive(Debug, Error)]
pub enum PostError {
    /// Publish was requested for a date with no local draft.
    #[error("No local draft found at {}\nRun without --publish first to create a draft.", .path.display())]
    NoDraft {
        /// Expected location of the draft
        path: PathBuf,
    },

    /// The draft exists but has nothing below its frontmatter.
    #[error("Post at {} has no content to publish.\nRun without --publish first to regenerate the draft.", .path.display())]
    EmptyBody {
        /// Location of the draft
        path: PathBuf,
    },
}

/// Represents all possible errors that can occur in the clippings application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use clippings::errors::AppError;
///
/// let error = AppError::Config("CONTENT_DIR not set".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: CONTENT_DIR not set");
/// ```
///
/// Converting from an IO error:
/// ```
/// use clippings::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No settings file exists in any of the searched locations.
    #[error("No .env file found. Searched:\n{}\nCreate one with your API tokens.", bullet_list(&display_paths(.searched)))]
    SettingsNotFound {
        /// Locations that were checked, in search order
        searched: Vec<PathBuf>,
    },

    /// The `--date` argument could not be parsed.
    #[error("Invalid date format '{input}'. Use YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        input: String,
    },

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors when fetching bookmarks.
    #[error("Bookmark fetch error: {0}")]
    Raindrop(#[from] RaindropError),

    /// Errors in the local draft.
    #[error("{0}")]
    Post(#[from] PostError),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect()
}
