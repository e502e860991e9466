use chrono::NaiveDate;
use clippings::bookmarks::{Bookmark, BookmarkSource, Highlight};
use clippings::errors::{AppError, AppResult, RaindropError};
use clippings::ops::{draft, DraftOutcome};
use clippings::post::PostDocument;
use clippings::store::PostStore;
use clippings::Config;
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

struct StubSource {
    bookmarks: Vec<Bookmark>,
    calls: Cell<usize>,
}

impl StubSource {
    fn new(bookmarks: Vec<Bookmark>) -> Self {
        Self {
            bookmarks,
            calls: Cell::new(0),
        }
    }
}

impl BookmarkSource for StubSource {
    fn fetch_for_date(&self, _date: NaiveDate) -> AppResult<Vec<Bookmark>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.bookmarks.clone())
    }
}

struct FailingSource;

impl BookmarkSource for FailingSource {
    fn fetch_for_date(&self, _date: NaiveDate) -> AppResult<Vec<Bookmark>> {
        Err(RaindropError::Status {
            endpoint: "/collections".to_string(),
            status: 500,
            body: "oops".to_string(),
        }
        .into())
    }
}

fn config_for(content_dir: &Path, category: Option<&str>) -> Config {
    let mut vars = HashMap::new();
    vars.insert(
        "CONTENT_DIR".to_string(),
        content_dir.to_string_lossy().to_string(),
    );
    if let Some(category) = category {
        vars.insert("MICROBLOG_CATEGORY".to_string(), category.to_string());
    }
    Config::from_vars(&vars).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()
}

fn bookmark(title: &str) -> Bookmark {
    Bookmark {
        title: title.to_string(),
        url: format!("https://{}.example", title.to_lowercase()),
        excerpt: format!("Excerpt for   {}", title),
        note: String::new(),
        highlights: Vec::new(),
        created: "2026-01-17T12:00:00.000Z".to_string(),
    }
}

#[test]
fn test_draft_creates_post_and_content_dir() {
    let temp = tempdir().unwrap();
    let content_dir = temp.path().join("site").join("content");
    let config = config_for(&content_dir, Some("Links"));
    let store = PostStore::new(&content_dir);

    let mut with_highlight = bookmark("Two");
    with_highlight.highlights = vec![Highlight {
        text: "A highlighted\nline".to_string(),
        note: "worth it".to_string(),
    }];
    let source = StubSource::new(vec![bookmark("One"), with_highlight]);

    let outcome = draft(&config, &source, &store, date()).unwrap();
    let path = content_dir.join("2026-01-17.md");
    assert_eq!(
        outcome,
        DraftOutcome::Written {
            path: path.clone(),
            link_count: 2,
            previous_link_count: None,
        }
    );

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "---\n\
         title: \"Clippings for January 17, 2026\"\n\
         date: 2026-01-17\n\
         type: post\n\
         categories:\n\
         - \"Links\"\n\
         ---\n\
         \n\
         - [One](https://one.example)\n\
         \n    Excerpt for One\n\
         - [Two](https://two.example)\n\
         \n    Excerpt for Two\n\
         \n    > A highlighted line\n    >\n    > — *worth it*\n"
    );
}

#[test]
fn test_regenerate_replaces_body_and_keeps_micropub_url() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    let url = "https://example.micro.blog/2026/01/17/clippings.html";

    let first = StubSource::new(vec![bookmark("One"), bookmark("Two"), bookmark("Three")]);
    draft(&config, &first, &store, date()).unwrap();
    store.save_micropub_url(date(), url).unwrap();

    let second = StubSource::new(vec![bookmark("Four")]);
    let outcome = draft(&config, &second, &store, date()).unwrap();

    match outcome {
        DraftOutcome::Written {
            link_count,
            previous_link_count,
            ..
        } => {
            assert_eq!(link_count, 1);
            assert_eq!(previous_link_count, Some(3));
        }
        other => panic!("expected Written, got {:?}", other),
    }

    let doc = store.read(date()).unwrap().unwrap();
    assert_eq!(doc.micropub_url(), Some(url));
    let urls: Vec<String> = doc.links().into_iter().map(|l| l.url).collect();
    assert_eq!(urls, vec!["https://four.example"]);
}

#[test]
fn test_zero_bookmarks_leaves_existing_file_untouched() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());

    let path = store.path_for(date());
    let existing = "---\ntitle: \"Hand edited\"\n---\n\n- [Kept](https://kept.example)\n";
    fs::write(&path, existing).unwrap();

    let source = StubSource::new(Vec::new());
    let outcome = draft(&config, &source, &store, date()).unwrap();

    assert_eq!(outcome, DraftOutcome::NothingToWrite);
    assert_eq!(source.calls.get(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), existing);
}

#[test]
fn test_zero_bookmarks_creates_nothing() {
    let temp = tempdir().unwrap();
    let content_dir = temp.path().join("missing");
    let config = config_for(&content_dir, None);
    let store = PostStore::new(&content_dir);

    let outcome = draft(&config, &StubSource::new(Vec::new()), &store, date()).unwrap();

    assert_eq!(outcome, DraftOutcome::NothingToWrite);
    assert!(!content_dir.exists());
}

#[test]
fn test_fetch_failure_propagates() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());

    let err = draft(&config, &FailingSource, &store, date()).unwrap_err();
    assert!(matches!(
        err,
        AppError::Raindrop(RaindropError::Status { status: 500, .. })
    ));
    assert!(!store.exists(date()));
}

#[test]
fn test_drafted_file_parses_back() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), Some("Links"));
    let store = PostStore::new(temp.path());

    draft(&config, &StubSource::new(vec![bookmark("One")]), &store, date()).unwrap();

    let content = fs::read_to_string(store.path_for(date())).unwrap();
    let doc = PostDocument::parse(&content);
    assert_eq!(doc.title_or_default(date()), "Clippings for January 17, 2026");
    assert_eq!(doc.micropub_url(), None);
    assert_eq!(doc.to_file_content(), content);
}
