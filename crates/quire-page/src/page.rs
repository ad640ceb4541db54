//! Page model: front matter plus body, parsed from and serialized to raw text.

/// Line that opens and closes a front matter block.
pub const FRONT_MATTER_DELIMITER: &str = "---\n";

/// Closing delimiter on the last line of a file without a final newline.
const CLOSING_AT_END: &str = "---";

/// A single markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Path relative to the source root, `/`-separated
    pub content_path: String,

    /// Raw front matter lines, each ending in a newline
    pub front_matter: String,

    /// Body text after the front matter
    pub content: String,
}

impl Page {
    /// Split raw text into front matter and body.
    ///
    /// Front matter is only recognized when the text starts with a delimiter
    /// line and a later line closes it. Anything else is all body.
    pub fn parse(content_path: impl Into<String>, raw: &str) -> Self {
        let content_path = content_path.into();

        let Some(after_open) = raw.strip_prefix(FRONT_MATTER_DELIMITER) else {
            return Self {
                content_path,
                front_matter: String::new(),
                content: raw.to_string(),
            };
        };

        let split = if let Some(body) = after_open.strip_prefix(FRONT_MATTER_DELIMITER) {
            Some(("", body))
        } else if after_open == CLOSING_AT_END {
            Some(("", ""))
        } else if let Some(pos) = after_open.find("\n---\n") {
            Some((&after_open[..pos + 1], &after_open[pos + 5..]))
        } else {
            after_open
                .strip_suffix(CLOSING_AT_END)
                .filter(|front_matter| front_matter.ends_with('\n'))
                .map(|front_matter| (front_matter, ""))
        };

        match split {
            Some((front_matter, body)) => Self {
                content_path,
                front_matter: front_matter.to_string(),
                content: body.to_string(),
            },
            None => Self {
                content_path,
                front_matter: String::new(),
                content: raw.to_string(),
            },
        }
    }

    /// Render the page back to raw text.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(
            self.front_matter.len() + self.content.len() + 2 * FRONT_MATTER_DELIMITER.len(),
        );
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push_str(&self.front_matter);
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push_str(&self.content);
        out
    }

    /// Add a line at the top of the front matter.
    pub fn prepend_front_matter(&mut self, line: &str) {
        let mut front_matter = String::with_capacity(line.len() + 1 + self.front_matter.len());
        front_matter.push_str(line);
        if !line.ends_with('\n') {
            front_matter.push('\n');
        }
        front_matter.push_str(&self.front_matter);
        self.front_matter = front_matter;
    }

    /// File name component of the content path.
    pub fn file_name(&self) -> &str {
        base_name(&self.content_path)
    }
}

/// Parent directory of a `/`-separated path, `.` for top-level names.
pub fn dir_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(pos) => &path[..pos],
        None => ".",
    }
}

/// Last non-empty component of a `/`-separated path.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Lexically normalize a `/`-separated path.
///
/// Removes `.` segments and empty segments, resolves `..` against the
/// preceding segment, and keeps leading `..` of relative paths.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_front_matter() {
        let page = Page::parse("a/b.md", "---\ndescription: x\n---\n# Title\n\nBody\n");

        assert_eq!(page.content_path, "a/b.md");
        assert_eq!(page.front_matter, "description: x\n");
        assert_eq!(page.content, "# Title\n\nBody\n");
    }

    #[test]
    fn parses_without_front_matter() {
        let raw = "# Just Markdown\n\nNo front matter here.";

        let page = Page::parse("x.md", raw);

        assert_eq!(page.front_matter, "");
        assert_eq!(page.content, raw);
    }

    #[test]
    fn horizontal_rules_are_body() {
        let raw = "# Title\n\nabove\n---\nbelow\n---\nend\n";

        let page = Page::parse("x.md", raw);

        assert_eq!(page.front_matter, "");
        assert_eq!(page.content, raw);
    }

    #[test]
    fn unclosed_front_matter_is_body() {
        let raw = "---\ntitle: x\n# no close";

        let page = Page::parse("x.md", raw);

        assert_eq!(page.front_matter, "");
        assert_eq!(page.content, raw);
    }

    #[test]
    fn parses_empty_front_matter() {
        let page = Page::parse("x.md", "---\n---\nbody");

        assert_eq!(page.front_matter, "");
        assert_eq!(page.content, "body");
    }

    #[test]
    fn closes_front_matter_at_end_of_input() {
        let page = Page::parse("x.md", "---\ntitle: x\n---");

        assert_eq!(page.front_matter, "title: x\n");
        assert_eq!(page.content, "");
        assert_eq!(page.serialize(), "---\ntitle: x\n---\n");

        let empty = Page::parse("x.md", "---\n---");
        assert_eq!(empty.front_matter, "");
        assert_eq!(empty.content, "");
    }

    #[test]
    fn dashes_ending_a_line_do_not_close() {
        let raw = "---\ntitle: x---";

        let page = Page::parse("x.md", raw);

        assert_eq!(page.front_matter, "");
        assert_eq!(page.content, raw);
    }

    #[test]
    fn serialize_round_trips() {
        let raw = "---\ndescription: >-\n  Some text\n---\n\n# Heading\n\nText with --- inline\n---\nmore\n";

        let page = Page::parse("x.md", raw);
        let again = Page::parse("x.md", &page.serialize());

        assert_eq!(page.serialize(), raw);
        assert_eq!(again, page);
    }

    #[test]
    fn serialize_adds_delimiters_to_plain_body() {
        let page = Page::parse("x.md", "# Heading\n");

        assert_eq!(page.serialize(), "---\n---\n# Heading\n");
        assert_eq!(Page::parse("x.md", &page.serialize()).content, "# Heading\n");
    }

    #[test]
    fn prepends_front_matter_lines() {
        let mut page = Page::parse("x.md", "---\ndescription: x\n---\nbody");

        page.prepend_front_matter("title: \"T\"");
        page.prepend_front_matter("weight: -100\n");

        assert_eq!(
            page.front_matter,
            "weight: -100\ntitle: \"T\"\ndescription: x\n"
        );
    }

    #[test]
    fn path_helpers() {
        assert_eq!(dir_of("a/b/c.md"), "a/b");
        assert_eq!(dir_of("c.md"), ".");
        assert_eq!(dir_of("a/b/"), "a/b");
        assert_eq!(dir_of("/c.md"), "/");

        assert_eq!(base_name("a/b/c.md"), "c.md");
        assert_eq!(base_name("a/b/"), "b");
        assert_eq!(base_name("c.md"), "c.md");
        assert_eq!(base_name(""), ".");
    }

    #[test]
    fn cleans_paths() {
        assert_eq!(clean_path("concepts/../setup/x.md"), "setup/x.md");
        assert_eq!(clean_path("a/./b//c"), "a/b/c");
        assert_eq!(clean_path("a/../../x"), "../x");
        assert_eq!(clean_path("/a/../../x"), "/x");
        assert_eq!(clean_path("./"), ".");
        assert_eq!(clean_path("a/b/.."), "a");
    }
}
