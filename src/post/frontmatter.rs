//! Ordered frontmatter fields with a fixed text form.
//!
//! Only the small subset of YAML that clippings posts use is understood:
//!
//! ```text
//! key: plain value
//! key: "quoted value"
//! key:
//! - "list item"
//! ```
//!
//! Keys keep their order through parse and render, so rewriting a post after adding
//! `micropub_url` changes nothing else in the block.

use std::fmt;

/// The value side of a frontmatter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Rendered bare: `key: value`.
    Plain(String),
    /// Rendered in double quotes: `key: "value"`.
    Quoted(String),
    /// Rendered as `key:` followed by one `- "item"` line per entry.
    List(Vec<String>),
}

impl FieldValue {
    /// The scalar text, or `None` for lists.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Plain(v) | FieldValue::Quoted(v) => Some(v),
            FieldValue::List(_) => None,
        }
    }
}

/// An ordered key/value block.
///
/// # Examples
///
/// ```
/// use clippings::post::frontmatter::{FieldValue, Frontmatter};
///
/// let mut fm = Frontmatter::new();
/// fm.set("title", FieldValue::Quoted("Clippings for January 17, 2026".into()));
/// fm.set("date", FieldValue::Plain("2026-01-17".into()));
///
/// let text = fm.to_string();
/// assert_eq!(text, "title: \"Clippings for January 17, 2026\"\ndate: 2026-01-17");
/// assert_eq!(Frontmatter::parse(&text), fm);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: Vec<(String, FieldValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing the value in place if present or appending otherwise.
    pub fn set(&mut self, key: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar value of `key`; `None` when absent, empty or a list.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(FieldValue::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses the lines between the delimiters.
    ///
    /// Each `key: value` line splits on its first colon so URLs survive intact.
    /// Surrounding whitespace is trimmed and surrounding double quotes stripped.
    /// `- item` lines directly after a key with an empty value become that key's
    /// list. Anything else is ignored.
    pub fn parse(text: &str) -> Self {
        let mut fm = Frontmatter::new();
        let mut open_list: Option<usize> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let (Some(idx), Some(item)) = (open_list, trimmed.strip_prefix("- ")) {
                if let FieldValue::List(items) = &mut fm.fields[idx].1 {
                    items.push(unquote(item.trim()).0.to_string());
                }
                continue;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                open_list = None;
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if value.is_empty() {
                fm.set(key, FieldValue::List(Vec::new()));
                open_list = fm.fields.iter().position(|(k, _)| k == key);
            } else {
                let (inner, quoted) = unquote(value);
                let value = if quoted {
                    FieldValue::Quoted(inner.to_string())
                } else {
                    FieldValue::Plain(inner.to_string())
                };
                fm.set(key, value);
                open_list = None;
            }
        }

        fm
    }
}

fn unquote(value: &str) -> (&str, bool) {
    match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => (inner, true),
        None => (value, false),
    }
}

impl fmt::Display for Frontmatter {
    /// Renders the fields without the surrounding delimiters or a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.fields {
            if !first {
                writeln!(f)?;
            }
            first = false;

            match value {
                FieldValue::Plain(v) => write!(f, "{}: {}", key, v)?,
                FieldValue::Quoted(v) => write!(f, "{}: \"{}\"", key, v)?,
                FieldValue::List(items) => {
                    write!(f, "{}:", key)?;
                    for item in items {
                        write!(f, "\n- \"{}\"", item)?;
                    }
                }
            }
        }
        Ok(())
    }
}
