//! Configuration management for the clippings application.
//!
//! Settings come from a `.env`-style settings file, found by searching a small fixed
//! list of locations, with process environment variables overriding individual keys.
//! The result is a single [`Config`] built once at startup and passed by reference to
//! every component; nothing else reads the environment.
//!
//! # Settings file search order
//!
//! 1. `./.env` (current directory)
//! 2. `~/.config/micropub-clippings/.env`
//! 3. `.env` next to the executable
//!
//! # Keys
//!
//! - `CONTENT_DIR` (required): directory holding one post per date
//! - `RAINDROP_API_TOKEN`: required for draft mode
//! - `MICROBLOG_TOKEN`: required for publish mode
//! - `RAINDROP_COLLECTION` (default `Clippings`), `RAINDROP_TAG` (default `mchn`)
//! - `MICROBLOG_CATEGORY` (optional), `PUBLISH_TIME` (default `23:59`)
//! - `RAINDROP_API_BASE`, `MICROPUB_ENDPOINT`: service URLs
//! - `EDITOR`: editor command, may include arguments

use crate::constants::{
    CONFIG_KEYS, DEFAULT_COLLECTION, DEFAULT_MICROPUB_ENDPOINT, DEFAULT_PUBLISH_TIME,
    DEFAULT_RAINDROP_API_BASE, DEFAULT_TAG, ENV_VAR_CONTENT_DIR, ENV_VAR_EDITOR,
    ENV_VAR_MICROBLOG_CATEGORY, ENV_VAR_MICROBLOG_TOKEN, ENV_VAR_MICROPUB_ENDPOINT,
    ENV_VAR_PUBLISH_TIME, ENV_VAR_RAINDROP_API_BASE, ENV_VAR_RAINDROP_COLLECTION,
    ENV_VAR_RAINDROP_TAG, ENV_VAR_RAINDROP_TOKEN, PUBLISH_TIME_FORMAT, REDACTED_PLACEHOLDER,
    SETTINGS_FILE_NAME, USER_SETTINGS_SUBDIR,
};
use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the clippings application.
///
/// # Examples
///
/// Building a configuration from explicit values:
/// ```
/// use clippings::Config;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("CONTENT_DIR".to_string(), "/site/content/clippings".to_string());
/// vars.insert("MICROBLOG_CATEGORY".to_string(), "Links".to_string());
///
/// let config = Config::from_vars(&vars).unwrap();
/// assert_eq!(config.collection_name, "Clippings");
/// assert_eq!(config.post_category.as_deref(), Some("Links"));
/// assert!(config.raindrop_token().is_err());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding one markdown post per calendar date.
    pub content_dir: PathBuf,

    /// Raindrop.io API token, needed to draft.
    pub raindrop_token: Option<String>,

    /// Micro.blog app token, needed to publish.
    pub microblog_token: Option<String>,

    /// Name of the Raindrop collection to read from.
    pub collection_name: String,

    /// Tag (without `#`) that marks a bookmark as a clipping.
    pub tag_filter: String,

    /// Category attached to published posts, if any.
    pub post_category: Option<String>,

    /// Time of day, `HH:MM`, combined with the post date for the published timestamp.
    pub publish_time: String,

    /// Base URL of the Raindrop REST API.
    pub raindrop_api_base: String,

    /// Micropub endpoint URL.
    pub micropub_endpoint: String,

    /// Editor command line; `None` means probe PATH.
    pub editor: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &Option<String>| token.as_ref().map(|_| REDACTED_PLACEHOLDER);
        f.debug_struct("Config")
            .field("content_dir", &self.content_dir)
            .field("raindrop_token", &redact(&self.raindrop_token))
            .field("microblog_token", &redact(&self.microblog_token))
            .field("collection_name", &self.collection_name)
            .field("tag_filter", &self.tag_filter)
            .field("post_category", &self.post_category)
            .field("publish_time", &self.publish_time)
            .field("raindrop_api_base", &self.raindrop_api_base)
            .field("micropub_endpoint", &self.micropub_endpoint)
            .field("editor", &self.editor)
            .finish()
    }
}

/// Returns the settings file locations in search order.
pub fn settings_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    paths.push(cwd.join(SETTINGS_FILE_NAME));

    let user_dir = shellexpand::tilde(USER_SETTINGS_SUBDIR);
    paths.push(PathBuf::from(user_dir.as_ref()).join(SETTINGS_FILE_NAME));

    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join(SETTINGS_FILE_NAME));
    }

    paths
}

/// Returns the first existing settings file among `paths`.
///
/// # Errors
///
/// Returns `AppError::SettingsNotFound` listing every searched path when none exists.
pub fn find_settings_file(paths: &[PathBuf]) -> AppResult<PathBuf> {
    paths
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| AppError::SettingsNotFound {
            searched: paths.to_vec(),
        })
}

/// Parses a `.env`-style settings file without touching the process environment.
///
/// # Errors
///
/// Returns `AppError::Config` if the file cannot be opened or a line is malformed.
pub fn read_settings_file(path: &Path) -> AppResult<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        AppError::Config(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| {
            AppError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        vars.insert(key, value);
    }
    Ok(vars)
}

impl Config {
    /// Loads configuration from the first settings file found in the default search
    /// order, overlaid with process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SettingsNotFound` when no settings file exists and
    /// `AppError::Config` when the file is unreadable or a required key is missing.
    pub fn load() -> AppResult<Self> {
        Self::load_with_search_paths(&settings_search_paths())
    }

    /// Same as [`Config::load`] with an explicit search list.
    pub fn load_with_search_paths(paths: &[PathBuf]) -> AppResult<Self> {
        let settings_path = find_settings_file(paths)?;
        debug!(path = %settings_path.display(), "Using settings file");

        let mut vars = read_settings_file(&settings_path)?;
        for key in CONFIG_KEYS {
            if let Ok(value) = env::var(key) {
                debug!(key, "Environment overrides settings file");
                vars.insert((*key).to_string(), value);
            }
        }

        Self::from_vars(&vars)
    }

    /// Builds a configuration from a key/value map, applying defaults.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `CONTENT_DIR` is missing or cannot be expanded.
    pub fn from_vars(vars: &HashMap<String, String>) -> AppResult<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let content_dir_raw = get(ENV_VAR_CONTENT_DIR).ok_or_else(|| {
            AppError::Config(format!(
                "{} not set. Add it to your .env file, e.g.:\n  {}=/path/to/your/site/content/clippings",
                ENV_VAR_CONTENT_DIR, ENV_VAR_CONTENT_DIR
            ))
        })?;

        // Handles ~ and $VAR references
        let expanded = shellexpand::full(&content_dir_raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        // Relative paths are taken from the directory the command runs in
        let mut content_dir = PathBuf::from(expanded.into_owned());
        if content_dir.is_relative() {
            let cwd = env::current_dir().map_err(|e| {
                AppError::Config(format!("Failed to resolve {}: {}", ENV_VAR_CONTENT_DIR, e))
            })?;
            content_dir = cwd.join(content_dir);
        }

        Ok(Config {
            content_dir,
            raindrop_token: get(ENV_VAR_RAINDROP_TOKEN),
            microblog_token: get(ENV_VAR_MICROBLOG_TOKEN),
            collection_name: get(ENV_VAR_RAINDROP_COLLECTION)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            tag_filter: get(ENV_VAR_RAINDROP_TAG).unwrap_or_else(|| DEFAULT_TAG.to_string()),
            post_category: get(ENV_VAR_MICROBLOG_CATEGORY),
            publish_time: get(ENV_VAR_PUBLISH_TIME)
                .unwrap_or_else(|| DEFAULT_PUBLISH_TIME.to_string()),
            raindrop_api_base: get(ENV_VAR_RAINDROP_API_BASE)
                .unwrap_or_else(|| DEFAULT_RAINDROP_API_BASE.to_string()),
            micropub_endpoint: get(ENV_VAR_MICROPUB_ENDPOINT)
                .unwrap_or_else(|| DEFAULT_MICROPUB_ENDPOINT.to_string()),
            editor: get(ENV_VAR_EDITOR),
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the collection or tag is blank. `PUBLISH_TIME`
    /// is only checked when publishing, see [`Config::checked_publish_time`].
    pub fn validate(&self) -> AppResult<()> {
        if self.collection_name.trim().is_empty() || self.tag_filter.trim().is_empty() {
            return Err(AppError::Config(
                "Collection name and tag filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The publish time, or a configuration error when it is not `HH:MM`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clippings::Config;
    /// use std::collections::HashMap;
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("CONTENT_DIR".to_string(), "/site/clippings".to_string());
    /// vars.insert("PUBLISH_TIME".to_string(), "noon".to_string());
    ///
    /// let config = Config::from_vars(&vars).unwrap();
    /// assert!(config.validate().is_ok());
    /// assert!(config.checked_publish_time().is_err());
    /// ```
    pub fn checked_publish_time(&self) -> AppResult<&str> {
        NaiveTime::parse_from_str(&self.publish_time, PUBLISH_TIME_FORMAT)
            .map(|_| self.publish_time.as_str())
            .map_err(|_| {
                AppError::Config(format!(
                    "{} must be HH:MM, got '{}'",
                    ENV_VAR_PUBLISH_TIME, self.publish_time
                ))
            })
    }

    /// The Raindrop token, or a configuration error explaining how to set it.
    pub fn raindrop_token(&self) -> AppResult<&str> {
        self.raindrop_token.as_deref().ok_or_else(|| {
            AppError::Config(format!("{} not set in .env file", ENV_VAR_RAINDROP_TOKEN))
        })
    }

    /// The Micro.blog token, or a configuration error explaining how to get one.
    pub fn microblog_token(&self) -> AppResult<&str> {
        self.microblog_token.as_deref().ok_or_else(|| {
            AppError::Config(format!(
                "{} not set in .env file\nGet one at: https://micro.blog/account/apps",
                ENV_VAR_MICROBLOG_TOKEN
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = Config::from_vars(&vars(&[("CONTENT_DIR", "/site/clippings")])).unwrap();

        assert_eq!(config.content_dir, PathBuf::from("/site/clippings"));
        assert_eq!(config.collection_name, "Clippings");
        assert_eq!(config.tag_filter, "mchn");
        assert_eq!(config.publish_time, "23:59");
        assert_eq!(config.post_category, None);
        assert_eq!(config.raindrop_api_base, "https://api.raindrop.io/rest/v1");
        assert_eq!(config.micropub_endpoint, "https://micro.blog/micropub");
        assert!(config.editor.is_none());
    }

    #[test]
    fn test_from_vars_requires_content_dir() {
        let result = Config::from_vars(&vars(&[("RAINDROP_API_TOKEN", "abc")]));
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("CONTENT_DIR not set")),
            _ => panic!("Expected Config error about CONTENT_DIR"),
        }
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = Config::from_vars(&vars(&[
            ("CONTENT_DIR", "/site/clippings"),
            ("MICROBLOG_CATEGORY", ""),
            ("RAINDROP_TAG", "  "),
            ("MICROBLOG_TOKEN", ""),
        ]))
        .unwrap();

        assert_eq!(config.post_category, None);
        assert_eq!(config.tag_filter, "mchn");
        assert!(config.microblog_token().is_err());
    }

    #[test]
    fn test_token_errors_name_the_key() {
        let config = Config::from_vars(&vars(&[("CONTENT_DIR", "/site")])).unwrap();

        match config.raindrop_token() {
            Err(AppError::Config(msg)) => assert!(msg.contains("RAINDROP_API_TOKEN")),
            _ => panic!("Expected missing token error"),
        }
        match config.microblog_token() {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("MICROBLOG_TOKEN"));
                assert!(msg.contains("micro.blog/account/apps"));
            }
            _ => panic!("Expected missing token error"),
        }
    }

    #[test]
    fn test_debug_impl_redacts_tokens() {
        let config = Config::from_vars(&vars(&[
            ("CONTENT_DIR", "/site"),
            ("RAINDROP_API_TOKEN", "raindrop-secret"),
            ("MICROBLOG_TOKEN", "microblog-secret"),
        ]))
        .unwrap();

        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("raindrop-secret"));
        assert!(!debug_output.contains("microblog-secret"));
    }

    #[test]
    fn test_relative_content_dir_resolves_against_cwd() {
        let config = Config::from_vars(&vars(&[("CONTENT_DIR", "content/clippings")])).unwrap();

        assert_eq!(
            config.content_dir,
            env::current_dir().unwrap().join("content/clippings")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_publish_time_checked_only_on_demand() {
        for good in ["00:00", "23:59", "07:30"] {
            let config = Config::from_vars(&vars(&[
                ("CONTENT_DIR", "/site"),
                ("PUBLISH_TIME", good),
            ]))
            .unwrap();
            assert_eq!(config.checked_publish_time().unwrap(), good);
        }

        for bad in ["24:00", "noon", "23:59:00"] {
            let config =
                Config::from_vars(&vars(&[("CONTENT_DIR", "/site"), ("PUBLISH_TIME", bad)]))
                    .unwrap();
            assert!(config.validate().is_ok(), "{} should not block drafting", bad);
            match config.checked_publish_time() {
                Err(AppError::Config(msg)) => assert!(msg.contains("must be HH:MM")),
                _ => panic!("{} should be rejected", bad),
            }
        }
    }

    #[test]
    fn test_find_settings_file_uses_first_existing() {
        let temp_dir = tempdir().unwrap();
        let first = temp_dir.path().join("a").join(".env");
        let second = temp_dir.path().join("b.env");
        let third = temp_dir.path().join("c.env");
        fs::write(&second, "CONTENT_DIR=/b\n").unwrap();
        fs::write(&third, "CONTENT_DIR=/c\n").unwrap();

        let found = find_settings_file(&[first, second.clone(), third]).unwrap();
        assert_eq!(found, second);
    }

    #[test]
    fn test_find_settings_file_reports_all_paths() {
        let paths = vec![PathBuf::from("/nope/.env"), PathBuf::from("/nada/.env")];
        match find_settings_file(&paths) {
            Err(AppError::SettingsNotFound { searched }) => assert_eq!(searched, paths),
            _ => panic!("Expected SettingsNotFound"),
        }
    }

    #[test]
    fn test_read_settings_file_handles_quotes_and_comments() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(
            &path,
            "# tokens\nRAINDROP_API_TOKEN=\"abc 123\"\nEDITOR='code --wait'\nCONTENT_DIR=/site\n",
        )
        .unwrap();

        let vars = read_settings_file(&path).unwrap();
        assert_eq!(vars["RAINDROP_API_TOKEN"], "abc 123");
        assert_eq!(vars["EDITOR"], "code --wait");
        assert_eq!(vars["CONTENT_DIR"], "/site");
    }
}
