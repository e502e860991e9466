/*!
# Clippings

Clippings turns a day's tagged Raindrop.io bookmarks into a markdown "clippings" post
and publishes it to Micro.blog over Micropub.

## Workflow

1. Draft: fetch the bookmarks created on a date, render them into
   `<CONTENT_DIR>/<YYYY-MM-DD>.md` and open the file in an editor. Running it again
   regenerates the body while keeping any recorded `micropub_url`.
2. Publish: send the local file to the Micropub endpoint. The first publish creates
   a post and records its url in the frontmatter; later runs update that post.

## Architecture

- `cli`: command-line interface handling using clap
- `config`: settings file discovery, environment overlay and validation
- `bookmarks`: Raindrop.io client and the local-date filter
- `post`: frontmatter, bookmark rendering and link parsing
- `store`: one post file per date
- `micropub`: create and update requests
- `editor`: launching the user's editor
- `ops`: the draft and publish operations
- `errors`: error types and utilities for error handling

## Usage Example

```rust,no_run
use chrono::Local;
use clippings::bookmarks::RaindropClient;
use clippings::ops::{draft, DraftOutcome};
use clippings::store::PostStore;
use clippings::Config;

fn main() -> clippings::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let source = RaindropClient::from_config(&config)?;
    let store = PostStore::new(&config.content_dir);

    if let DraftOutcome::Written { path, .. } =
        draft(&config, &source, &store, Local::now().date_naive())?
    {
        println!("Draft ready at: {}", path.display());
    }
    Ok(())
}
```
*/

/// Raindrop.io bookmarks and date filtering
pub mod bookmarks;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Editor abstraction
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Micropub client
pub mod micropub;
/// Draft and publish operations
pub mod ops;
/// Post document model and rendering
pub mod post;
/// Local post files
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
