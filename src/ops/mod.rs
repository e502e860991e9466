//! High-level operations: drafting a post from bookmarks and publishing it.
//!
//! Both operations return an outcome value and leave user-facing output and exit
//! codes to `main`.

pub mod draft;
pub mod publish;

pub use draft::{draft, DraftOutcome};
pub use publish::{publish, publish_draft, read_draft, PublishOutcome};
