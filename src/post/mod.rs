//! Clippings posts: frontmatter plus a markdown body of bookmark blocks.
//!
//! A post file on disk looks like
//!
//! ```text
//! ---
//! title: "Clippings for January 17, 2026"
//! date: 2026-01-17
//! type: post
//! categories:
//! - "Links"
//! micropub_url: https://example.micro.blog/2026/01/17/clippings.html
//! ---
//!
//! - [Title](https://example.com)
//!
//!     Excerpt.
//! ```
//!
//! The body is always rebuilt from fetched bookmarks; `micropub_url` is the only value
//! carried over from an earlier version of the file.

pub mod frontmatter;
pub mod links;
pub mod render;

use crate::bookmarks::Bookmark;
use crate::constants::{
    DATE_FORMAT_ISO, FRONTMATTER_DELIMITER, MICROPUB_URL_KEY, POST_TYPE, TITLE_DATE_FORMAT,
};
use chrono::NaiveDate;

pub use frontmatter::{FieldValue, Frontmatter};
pub use links::{parse_links, PostLink};

/// Default post title for `date`, e.g. `Clippings for January 7, 2026`.
pub fn post_title(date: NaiveDate) -> String {
    format!("Clippings for {}", date.format(TITLE_DATE_FORMAT))
}

/// Builds the frontmatter of a freshly rendered post.
///
/// Fields are `title`, `date` and `type`, then `categories` when a category is set and
/// `micropub_url` when one was recorded. Empty strings count as unset.
pub fn render_frontmatter(
    date: NaiveDate,
    category: Option<&str>,
    micropub_url: Option<&str>,
) -> Frontmatter {
    let mut fm = Frontmatter::new();
    fm.set("title", FieldValue::Quoted(post_title(date)));
    fm.set(
        "date",
        FieldValue::Plain(date.format(DATE_FORMAT_ISO).to_string()),
    );
    fm.set("type", FieldValue::Plain(POST_TYPE.to_string()));

    if let Some(category) = category.filter(|c| !c.is_empty()) {
        fm.set("categories", FieldValue::List(vec![category.to_string()]));
    }
    if let Some(url) = micropub_url.filter(|u| !u.is_empty()) {
        fm.set(MICROPUB_URL_KEY, FieldValue::Plain(url.to_string()));
    }
    fm
}

/// Sets `micropub_url` in raw file content, leaving every other line untouched.
///
/// An existing top-level `micropub_url:` line inside the frontmatter is replaced;
/// otherwise the field goes just before the closing delimiter. Content without a
/// frontmatter block gets one holding only the field.
///
/// # Examples
///
/// ```
/// use clippings::post::with_micropub_url;
///
/// let content = "---\n# reviewed\ntags:\n  - rust\n---\n\nbody\n";
/// assert_eq!(
///     with_micropub_url(content, "https://mb.example/p/1"),
///     "---\n# reviewed\ntags:\n  - rust\nmicropub_url: https://mb.example/p/1\n---\n\nbody\n"
/// );
/// ```
pub fn with_micropub_url(content: &str, url: &str) -> String {
    let field = format!("{}: {}", MICROPUB_URL_KEY, url);
    let key_prefix = format!("{}:", MICROPUB_URL_KEY);
    let is_delimiter = |line: &str| line.trim_end() == FRONTMATTER_DELIMITER;

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let closing = match lines.first() {
        Some(first) if is_delimiter(first) => lines
            .iter()
            .skip(1)
            .position(|line| is_delimiter(line))
            .map(|i| i + 1),
        _ => None,
    };

    let closing = match closing {
        Some(closing) => closing,
        None => {
            return format!(
                "{delim}\n{field}\n{delim}\n\n{content}",
                delim = FRONTMATTER_DELIMITER
            )
        }
    };

    let mut out = String::with_capacity(content.len() + field.len() + 1);
    let mut replaced = false;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 && i < closing && line.starts_with(&key_prefix) {
            out.push_str(&field);
            out.push_str(&line[line.trim_end_matches(['\r', '\n']).len()..]);
            replaced = true;
            continue;
        }
        if i == closing && !replaced {
            out.push_str(&field);
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

/// A parsed or freshly rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub frontmatter: Frontmatter,
    /// Markdown body without surrounding blank lines.
    pub body: String,
}

impl PostDocument {
    /// Renders the post for `date` from `bookmarks`.
    ///
    /// Returns `None` when there are no bookmarks, since an empty post is never
    /// written.
    pub fn render(
        date: NaiveDate,
        bookmarks: &[Bookmark],
        category: Option<&str>,
        micropub_url: Option<&str>,
    ) -> Option<Self> {
        if bookmarks.is_empty() {
            return None;
        }
        Some(PostDocument {
            frontmatter: render_frontmatter(date, category, micropub_url),
            body: render::render_body(bookmarks),
        })
    }

    /// Parses file content.
    ///
    /// Content starting with `---` is split on the delimiter at most twice: the middle
    /// part is the frontmatter and the trimmed remainder the body. Anything else is
    /// all body.
    ///
    /// # Examples
    ///
    /// ```
    /// use clippings::post::PostDocument;
    ///
    /// let doc = PostDocument::parse("---\ntitle: \"T\"\nmicropub_url: https://mb.example/p/1\n---\n\n- [A](https://a.example)\n");
    /// assert_eq!(doc.micropub_url(), Some("https://mb.example/p/1"));
    /// assert_eq!(doc.body, "- [A](https://a.example)");
    ///
    /// let bare = PostDocument::parse("just text\n");
    /// assert!(bare.frontmatter.is_empty());
    /// assert_eq!(bare.body, "just text\n");
    /// ```
    pub fn parse(content: &str) -> Self {
        if content.starts_with(FRONTMATTER_DELIMITER) {
            let parts: Vec<&str> = content.splitn(3, FRONTMATTER_DELIMITER).collect();
            if let [_, frontmatter, body] = parts.as_slice() {
                return PostDocument {
                    frontmatter: Frontmatter::parse(frontmatter.trim()),
                    body: body.trim().to_string(),
                };
            }
        }

        PostDocument {
            frontmatter: Frontmatter::new(),
            body: content.to_string(),
        }
    }

    /// The recorded remote identifier, if any.
    pub fn micropub_url(&self) -> Option<&str> {
        self.frontmatter.get_str(MICROPUB_URL_KEY)
    }

    /// Title from the frontmatter, or the default title for `date`.
    pub fn title_or_default(&self, date: NaiveDate) -> String {
        self.frontmatter
            .get_str("title")
            .map(str::to_string)
            .unwrap_or_else(|| post_title(date))
    }

    /// Link items in the body.
    pub fn links(&self) -> Vec<PostLink> {
        parse_links(&self.body)
    }

    /// Records `url` as the remote identifier, keeping the position of an existing key.
    pub fn set_micropub_url(&mut self, url: &str) {
        self.frontmatter
            .set(MICROPUB_URL_KEY, FieldValue::Plain(url.to_string()));
    }

    /// File content: `---\n<fields>\n---\n\n<body>\n`.
    pub fn to_file_content(&self) -> String {
        format!(
            "{delim}\n{fm}\n{delim}\n\n{body}\n",
            delim = FRONTMATTER_DELIMITER,
            fm = self.frontmatter,
            body = self.body
        )
    }
}
