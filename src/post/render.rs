//! Markdown rendering of bookmarks.

use crate::bookmarks::Bookmark;

const INDENT: &str = "    ";

/// Collapses every run of whitespace to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders one bookmark as a markdown list item.
///
/// The link line is followed, each after a blank line and indented four spaces, by
/// the excerpt, the italicised personal note, and one blockquote per non-empty
/// highlight. A highlight's own note becomes an attributed line under its quote.
///
/// # Examples
///
/// ```
/// use clippings::bookmarks::{Bookmark, Highlight};
/// use clippings::post::render::format_bookmark;
///
/// let bookmark = Bookmark {
///     title: "Rust 2024".to_string(),
///     url: "https://blog.rust-lang.org/".to_string(),
///     excerpt: "The  new\nedition.".to_string(),
///     note: String::new(),
///     highlights: vec![Highlight { text: "Stable.".to_string(), note: "finally".to_string() }],
///     created: String::new(),
/// };
///
/// assert_eq!(
///     format_bookmark(&bookmark),
///     "- [Rust 2024](https://blog.rust-lang.org/)\n\n    The new edition.\n\n    > Stable.\n    >\n    > — *finally*"
/// );
/// ```
pub fn format_bookmark(bookmark: &Bookmark) -> String {
    let mut block = format!("- [{}]({})", bookmark.title, bookmark.url);

    let excerpt = collapse_whitespace(&bookmark.excerpt);
    if !excerpt.is_empty() {
        block.push_str(&format!("\n\n{INDENT}{excerpt}"));
    }

    let note = collapse_whitespace(&bookmark.note);
    if !note.is_empty() {
        block.push_str(&format!("\n\n{INDENT}*{note}*"));
    }

    for highlight in &bookmark.highlights {
        let text = collapse_whitespace(&highlight.text);
        if text.is_empty() {
            continue;
        }
        block.push_str(&format!("\n\n{INDENT}> {text}"));

        // Highlight notes keep their own spacing; only the ends are trimmed.
        let hl_note = highlight.note.trim();
        if !hl_note.is_empty() {
            block.push_str(&format!("\n{INDENT}>\n{INDENT}> — *{hl_note}*"));
        }
    }

    block
}

/// Renders the post body: bookmark blocks joined by single newlines.
pub fn render_body(bookmarks: &[Bookmark]) -> String {
    bookmarks
        .iter()
        .map(format_bookmark)
        .collect::<Vec<_>>()
        .join("\n")
}
