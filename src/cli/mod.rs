use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use clap::Parser;
use std::str::FromStr;

/// Create or update a clippings post from Raindrop.io bookmarks
#[derive(Parser, Debug)]
#[clap(
    name = APP_NAME,
    about = APP_DESCRIPTION,
    author,
    version,
    long_about = None
)]
pub struct CliArgs {
    /// Date to generate clippings for (format: YYYY-MM-DD or YYYYMMDD, default: today)
    #[clap(short = 'd', long)]
    pub date: Option<String>,

    /// Publish the existing draft to Micro.blog
    #[clap(short = 'p', long)]
    pub publish: bool,

    /// Don't open the draft in an editor after creating it
    #[clap(long)]
    pub no_edit: bool,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, value_name = "FORMAT", default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// Resolves `--date`, defaulting to `today`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidDate` when the value is in neither accepted format.
    pub fn resolve_date(&self, today: NaiveDate) -> AppResult<NaiveDate> {
        match self.date.as_deref() {
            None => Ok(today),
            Some(input) => parse_date(input),
        }
    }
}

/// Parses `YYYY-MM-DD`, falling back to `YYYYMMDD`.
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::from_str(input)
        .or_else(|_| NaiveDate::parse_from_str(input, DATE_FORMAT_COMPACT))
        .map_err(|_| AppError::InvalidDate {
            input: input.to_string(),
        })
}
