use chrono::NaiveDate;
use clippings::errors::{AppError, MicropubError, PostError};
use clippings::micropub::MicropubClient;
use clippings::ops::{publish, PublishOutcome};
use clippings::post::PostDocument;
use clippings::store::PostStore;
use clippings::Config;
use mockito::Matcher;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const BODY: &str = "- [One](https://one.example)\n\n    First excerpt\n- [Two](https://two.example)";

fn config_for(content_dir: &Path, category: Option<&str>) -> Config {
    let mut vars = HashMap::new();
    vars.insert(
        "CONTENT_DIR".to_string(),
        content_dir.to_string_lossy().to_string(),
    );
    vars.insert("MICROBLOG_TOKEN".to_string(), "mb-token".to_string());
    if let Some(category) = category {
        vars.insert("MICROBLOG_CATEGORY".to_string(), category.to_string());
    }
    Config::from_vars(&vars).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()
}

fn write_post(store: &PostStore, micropub_url: Option<&str>) -> String {
    let url_line = micropub_url
        .map(|u| format!("micropub_url: {}\n", u))
        .unwrap_or_default();
    let content = format!(
        "---\ntitle: \"Clippings for January 17, 2026\"\ndate: 2026-01-17\ntype: post\n{}---\n\n{}\n",
        url_line, BODY
    );
    fs::write(store.path_for(date()), &content).unwrap();
    content
}

#[test]
fn test_create_saves_location_into_frontmatter() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    write_post(&store, None);

    let location = "https://example.micro.blog/2026/01/17/clippings.html";
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/micropub")
        .match_header("authorization", "Bearer mb-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("h".into(), "entry".into()),
            Matcher::UrlEncoded("name".into(), "Clippings for January 17, 2026".into()),
            Matcher::UrlEncoded("content".into(), BODY.into()),
            Matcher::UrlEncoded("published".into(), "2026-01-17T23:59:00".into()),
            Matcher::UrlEncoded("mp-slug".into(), "2026-01-17".into()),
        ]))
        .with_status(201)
        .with_header("Location", location)
        .create();

    let client = MicropubClient::new(format!("{}/micropub", server.url()), "mb-token");
    let outcome = publish(&config, &client, &store, date()).unwrap();

    mock.assert();
    match outcome {
        PublishOutcome::Created {
            location: Some(saved),
            link_count,
            ..
        } => {
            assert_eq!(saved, location);
            assert_eq!(link_count, 2);
        }
        other => panic!("expected Created with location, got {:?}", other),
    }

    let reread = store.read(date()).unwrap().unwrap();
    assert_eq!(reread.micropub_url(), Some(location));
    assert_eq!(reread.body, BODY);
}

#[test]
fn test_create_with_category_sends_slug_and_category() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), Some("Links"));
    let store = PostStore::new(temp.path());
    write_post(&store, None);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/micropub")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mp-slug".into(), "links-2026-01-17".into()),
            Matcher::UrlEncoded("category".into(), "Links".into()),
        ]))
        .with_status(202)
        .create();

    let client = MicropubClient::new(format!("{}/micropub", server.url()), "mb-token");
    let outcome = publish(&config, &client, &store, date()).unwrap();

    mock.assert();
    assert!(matches!(
        outcome,
        PublishOutcome::Created { location: None, .. }
    ));
    // No Location header, so nothing is recorded.
    assert_eq!(store.read(date()).unwrap().unwrap().micropub_url(), None);
}

#[test]
fn test_update_sends_json_replace() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    let url = "https://example.micro.blog/2026/01/17/clippings.html";
    let original = write_post(&store, Some(url));

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/micropub")
        .match_header("authorization", "Bearer mb-token")
        .match_body(Matcher::Json(json!({
            "action": "update",
            "url": url,
            "replace": {
                "content": [BODY],
                "name": ["Clippings for January 17, 2026"],
            }
        })))
        .with_status(204)
        .create();

    let client = MicropubClient::new(format!("{}/micropub", server.url()), "mb-token");
    let outcome = publish(&config, &client, &store, date()).unwrap();

    mock.assert();
    match outcome {
        PublishOutcome::Updated {
            url: updated,
            link_count,
            ..
        } => {
            assert_eq!(updated, url);
            assert_eq!(link_count, 2);
        }
        other => panic!("expected Updated, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(store.path_for(date())).unwrap(),
        original
    );
}

#[test]
fn test_rejected_create_leaves_file_untouched() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    let original = write_post(&store, None);

    let mut server = mockito::Server::new();
    server
        .mock("POST", "/micropub")
        .with_status(400)
        .with_header("Location", "https://ignored.example")
        .with_body("{\"error\":\"invalid_request\"}")
        .create();

    let client = MicropubClient::new(format!("{}/micropub", server.url()), "mb-token");
    let outcome = publish(&config, &client, &store, date()).unwrap();

    assert!(!outcome.is_success());
    match outcome {
        PublishOutcome::Failed {
            error: MicropubError::Rejected { status, body },
        } => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_request"));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(store.path_for(date())).unwrap(),
        original
    );
}

#[test]
fn test_unreachable_endpoint_is_a_failed_outcome() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    write_post(&store, Some("https://example.micro.blog/p/1"));

    // Port 9 (discard) on localhost is not listening in test environments.
    let client = MicropubClient::new("http://127.0.0.1:9/micropub", "mb-token");
    let outcome = publish(&config, &client, &store, date()).unwrap();

    assert!(matches!(
        outcome,
        PublishOutcome::Failed {
            error: MicropubError::Http(_)
        }
    ));
}

#[test]
fn test_missing_draft_is_an_error() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    let client = MicropubClient::new("http://127.0.0.1:9/micropub", "mb-token");

    let err = publish(&config, &client, &store, date()).unwrap_err();
    match err {
        AppError::Post(PostError::NoDraft { path }) => {
            assert_eq!(path, temp.path().join("2026-01-17.md"));
        }
        other => panic!("expected NoDraft, got {:?}", other),
    }
}

#[test]
fn test_empty_body_is_an_error() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    fs::write(
        store.path_for(date()),
        "---\ntitle: \"Clippings for January 17, 2026\"\n---\n\n   \n",
    )
    .unwrap();
    let client = MicropubClient::new("http://127.0.0.1:9/micropub", "mb-token");

    let err = publish(&config, &client, &store, date()).unwrap_err();
    assert!(matches!(err, AppError::Post(PostError::EmptyBody { .. })));
}

#[test]
fn test_title_defaults_when_frontmatter_has_none() {
    let temp = tempdir().unwrap();
    let config = config_for(temp.path(), None);
    let store = PostStore::new(temp.path());
    fs::write(store.path_for(date()), format!("{}\n", BODY)).unwrap();
    assert!(PostDocument::parse(&format!("{}\n", BODY))
        .frontmatter
        .is_empty());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/micropub")
        .match_body(Matcher::UrlEncoded(
            "name".into(),
            "Clippings for January 17, 2026".into(),
        ))
        .with_status(201)
        .create();

    let client = MicropubClient::new(format!("{}/micropub", server.url()), "mb-token");
    publish(&config, &client, &store, date()).unwrap();
    mock.assert();
}

#[test]
fn test_invalid_publish_time_blocks_create() {
    let temp = tempdir().unwrap();
    let mut vars = HashMap::new();
    vars.insert(
        "CONTENT_DIR".to_string(),
        temp.path().to_string_lossy().to_string(),
    );
    vars.insert("PUBLISH_TIME".to_string(), "noon".to_string());
    let config = Config::from_vars(&vars).unwrap();
    let store = PostStore::new(temp.path());
    let original = write_post(&store, None);

    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/micropub").expect(0).create();

    let client = MicropubClient::new(format!("{}/micropub", server.url()), "mb-token");
    match publish(&config, &client, &store, date()) {
        Err(AppError::Config(msg)) => assert!(msg.contains("PUBLISH_TIME must be HH:MM")),
        other => panic!("expected Config error, got {:?}", other),
    }

    mock.assert();
    assert_eq!(
        fs::read_to_string(store.path_for(date())).unwrap(),
        original
    );
}
