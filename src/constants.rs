//! Constants used throughout the application.
//!
//! This module contains all constants used in the clippings application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "clippings";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Create/update clippings posts from Raindrop.io";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Exit codes
/// Exit status for any fatal error (configuration, local state, fetch, I/O).
pub const EXIT_FATAL: u8 = 1;
/// Exit status when the Micropub endpoint rejected a create or update.
pub const EXIT_PUBLISH_FAILED: u8 = 2;

// Settings file
/// Name of the settings file searched for at startup.
pub const SETTINGS_FILE_NAME: &str = ".env";
/// Per-user settings directory, relative to the home directory.
pub const USER_SETTINGS_SUBDIR: &str = "~/.config/micropub-clippings";

// Configuration Keys & Environment Variables
/// Directory where clippings posts are written.
pub const ENV_VAR_CONTENT_DIR: &str = "CONTENT_DIR";
/// Raindrop.io API token.
pub const ENV_VAR_RAINDROP_TOKEN: &str = "RAINDROP_API_TOKEN";
/// Micro.blog app token.
pub const ENV_VAR_MICROBLOG_TOKEN: &str = "MICROBLOG_TOKEN";
/// Raindrop collection holding the clippings.
pub const ENV_VAR_RAINDROP_COLLECTION: &str = "RAINDROP_COLLECTION";
/// Tag used to select bookmarks within the collection.
pub const ENV_VAR_RAINDROP_TAG: &str = "RAINDROP_TAG";
/// Optional category for published posts.
pub const ENV_VAR_MICROBLOG_CATEGORY: &str = "MICROBLOG_CATEGORY";
/// Time of day (HH:MM) used for the published timestamp.
pub const ENV_VAR_PUBLISH_TIME: &str = "PUBLISH_TIME";
/// Base URL of the Raindrop REST API.
pub const ENV_VAR_RAINDROP_API_BASE: &str = "RAINDROP_API_BASE";
/// Micropub endpoint URL.
pub const ENV_VAR_MICROPUB_ENDPOINT: &str = "MICROPUB_ENDPOINT";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";

/// Every key the configuration loader reads, in documentation order.
pub const CONFIG_KEYS: &[&str] = &[
    ENV_VAR_CONTENT_DIR,
    ENV_VAR_RAINDROP_TOKEN,
    ENV_VAR_MICROBLOG_TOKEN,
    ENV_VAR_RAINDROP_COLLECTION,
    ENV_VAR_RAINDROP_TAG,
    ENV_VAR_MICROBLOG_CATEGORY,
    ENV_VAR_PUBLISH_TIME,
    ENV_VAR_RAINDROP_API_BASE,
    ENV_VAR_MICROPUB_ENDPOINT,
    ENV_VAR_EDITOR,
];

// Defaults
/// Default Raindrop collection name.
pub const DEFAULT_COLLECTION: &str = "Clippings";
/// Default tag filter.
pub const DEFAULT_TAG: &str = "mchn";
/// Default publish time of day.
pub const DEFAULT_PUBLISH_TIME: &str = "23:59";
/// Default Raindrop REST API base.
pub const DEFAULT_RAINDROP_API_BASE: &str = "https://api.raindrop.io/rest/v1";
/// Default Micropub endpoint.
pub const DEFAULT_MICROPUB_ENDPOINT: &str = "https://micro.blog/micropub";
/// Editors probed on PATH when `EDITOR` is unset.
pub const FALLBACK_EDITORS: &[&str] = &["code", "subl", "vim", "nano"];

// Raindrop API
/// Number of items requested from the search endpoint. Only one page is fetched.
pub const RAINDROP_PAGE_SIZE: u32 = 50;
/// Title used when a bookmark has none.
pub const UNTITLED_BOOKMARK: &str = "Untitled";

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// File extension for clippings posts.
pub const POST_FILE_EXTENSION: &str = ".md";
/// Delimiter line surrounding the frontmatter block.
pub const FRONTMATTER_DELIMITER: &str = "---";
/// Frontmatter key holding the remote post URL.
pub const MICROPUB_URL_KEY: &str = "micropub_url";
/// Value of the `type` frontmatter field.
pub const POST_TYPE: &str = "post";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Date format used in post titles, e.g. "January 7, 2026".
pub const TITLE_DATE_FORMAT: &str = "%B %-d, %Y";
/// Time-of-day format accepted for `PUBLISH_TIME`.
pub const PUBLISH_TIME_FORMAT: &str = "%H:%M";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "clippings";
