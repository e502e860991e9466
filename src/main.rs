/*!
# Clippings

Command-line entry point. Builds the configuration once, runs either the draft or the
publish operation, prints the user-facing summary and maps the result to an exit code.

## Usage

```
clippings [OPTIONS]

Options:
  -d, --date <DATE>          Date to generate clippings for (YYYY-MM-DD or YYYYMMDD, default: today)
  -p, --publish              Publish the existing draft to Micro.blog
      --no-edit              Don't open the draft in an editor after creating it
  -v, --verbose              Print verbose output
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
  -h, --help                 Print help
  -V, --version              Print version
```

## Exit codes

- `0`: success, including a date with no matching bookmarks
- `1`: configuration, local state, bookmark service, I/O or editor failure
- `2`: the Micropub endpoint rejected the request or could not be reached
*/

use chrono::Local;
use clippings::bookmarks::RaindropClient;
use clippings::cli::CliArgs;
use clippings::config::Config;
use clippings::constants::{
    APP_NAME, DEFAULT_LOG_LEVEL, EXIT_FATAL, EXIT_PUBLISH_FAILED, LOG_FORMAT_JSON,
    TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use clippings::editor::{resolve_editor, Editor};
use clippings::errors::AppResult;
use clippings::micropub::MicropubClient;
use clippings::ops::{draft, publish_draft, read_draft, DraftOutcome, PublishOutcome};
use clippings::store::PostStore;
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

fn init_tracing(verbose: bool, log_format: &str) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let json = log_format == LOG_FORMAT_JSON;
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        "app_invocation",
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();
    debug!(?args, "Parsed CLI arguments");

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Run failed");
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(args: &CliArgs) -> AppResult<ExitCode> {
    let date = args.resolve_date(Local::now().date_naive())?;

    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;
    debug!(?config, "Configuration loaded");

    let store = PostStore::new(&config.content_dir);

    if args.publish {
        let doc = read_draft(&store, date)?;
        let client = MicropubClient::from_config(&config)?;
        let outcome = publish_draft(&config, &client, &store, date, &doc)?;
        return Ok(report_publish(&outcome));
    }

    println!("Fetching clippings for {}...", date);
    let source = RaindropClient::from_config(&config)?;

    match draft(&config, &source, &store, date)? {
        DraftOutcome::NothingToWrite => {
            println!("No bookmarks found for {} matching criteria.", date);
            println!("  Collection: {}", config.collection_name);
            println!("  Tag: #{}", config.tag_filter);
        }
        DraftOutcome::Written {
            path,
            link_count,
            previous_link_count,
        } => {
            match previous_link_count {
                Some(previous) => println!(
                    "Regenerating post with {} link(s) (was {})",
                    link_count, previous
                ),
                None => println!("Creating new clippings post with {} link(s)", link_count),
            }

            if !args.no_edit {
                match resolve_editor(&config)? {
                    Some(editor) => editor.open(&path)?,
                    None => {
                        println!("Created: {}", path.display());
                        println!("Set $EDITOR to open automatically");
                    }
                }
            }

            println!("\nDraft ready at: {}", path.display());
            let date_arg = args
                .date
                .as_ref()
                .map(|_| format!(" --date {}", date))
                .unwrap_or_default();
            println!(
                "Preview locally, then publish with: {} --publish{}",
                APP_NAME, date_arg
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn report_publish(outcome: &PublishOutcome) -> ExitCode {
    match outcome {
        PublishOutcome::Created {
            title,
            link_count,
            location,
        } => {
            println!("Published new post to Micro.blog");
            println!("  Title: {}", title);
            println!("  Links: {}", link_count);
            println!("\nPublished successfully!");
            if let Some(location) = location {
                println!("  URL: {}", location);
                println!("  Saved URL to frontmatter for future updates");
            }
            ExitCode::SUCCESS
        }
        PublishOutcome::Updated {
            title,
            link_count,
            url,
        } => {
            println!("Updated existing post on Micro.blog");
            println!("  Title: {}", title);
            println!("  URL: {}", url);
            println!("  Links: {}", link_count);
            println!("\nUpdated successfully!");
            ExitCode::SUCCESS
        }
        PublishOutcome::Failed { error } => {
            eprintln!("\nError publishing: {}", error);
            ExitCode::from(EXIT_PUBLISH_FAILED)
        }
    }
}
