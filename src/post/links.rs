//! Link items in an existing post body.

/// One `- [title](url)` list item together with the lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub title: String,
    pub url: String,
    /// The item line and its continuation lines, trailing whitespace removed.
    pub block: String,
}

/// Splits `line` into `(title, url)` when it opens a link item.
fn link_item(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('[')?;

    let close = rest.find(']')?;
    let title = &rest[..close];
    let rest = rest[close + 1..].strip_prefix('(')?;
    let url = &rest[..rest.find(')')?];

    if title.is_empty() || url.is_empty() {
        return None;
    }
    Some((title, url))
}

fn push_link(links: &mut Vec<PostLink>, mut link: PostLink) {
    link.block = link.block.trim_end().to_string();
    match links.iter_mut().find(|l| l.url == link.url) {
        Some(existing) => *existing = link,
        None => links.push(link),
    }
}

/// Extracts the link items of `body` in order.
///
/// Each item runs until the next link item or the end of the body. Items sharing a
/// url collapse into one entry holding the last block, at the position of the first.
///
/// # Examples
///
/// ```
/// use clippings::post::links::parse_links;
///
/// let body = "- [One](https://one.example)\n\n    Excerpt\n- [Two](https://two.example)";
/// let links = parse_links(body);
///
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].block, "- [One](https://one.example)\n\n    Excerpt");
/// assert_eq!(links[1].url, "https://two.example");
/// ```
pub fn parse_links(body: &str) -> Vec<PostLink> {
    let mut links: Vec<PostLink> = Vec::new();
    let mut current: Option<PostLink> = None;

    for line in body.lines() {
        if let Some((title, url)) = link_item(line) {
            if let Some(done) = current.take() {
                push_link(&mut links, done);
            }
            current = Some(PostLink {
                title: title.to_string(),
                url: url.to_string(),
                block: line.to_string(),
            });
        } else if let Some(link) = current.as_mut() {
            link.block.push('\n');
            link.block.push_str(line);
        }
    }
    if let Some(done) = current.take() {
        push_link(&mut links, done);
    }

    links
}
