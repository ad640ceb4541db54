//! SUMMARY.md ordering.
//!
//! GitBook lists every page in `SUMMARY.md`. The position of a page among
//! the entries of its directory decides its weight in the generated site.

use std::collections::HashMap;

use crate::page::{base_name, dir_of};
use crate::pattern::{PatternCache, PatternError};

/// Name of the listing file at the root of a GitBook tree.
pub const SUMMARY_FILE: &str = "SUMMARY.md";

/// Name GitBook uses for a directory's own page.
pub const INDEX_FILE: &str = "README.md";

const LINK_PATTERN: &str = r"\[([^\]]*)\]\(([^)]*)\)";

/// A single entry of the listing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    /// Link text
    pub title: String,

    /// Link target, relative to the source root
    pub content_path: String,
}

/// Listing entries grouped by owning directory, in file order.
#[derive(Debug, Clone, Default)]
pub struct SummaryOrder {
    by_dir: HashMap<String, Vec<SummaryItem>>,
}

impl SummaryOrder {
    /// Build the ordering from the text of a listing file.
    pub fn parse(patterns: &PatternCache, summary: &str) -> Result<Self, PatternError> {
        let mut order = Self::default();

        for link in patterns.find_all(LINK_PATTERN, summary)? {
            let (Some(title), Some(content_path)) = (link.group(1), link.group(2)) else {
                continue;
            };
            order.push(SummaryItem {
                title: title.to_string(),
                content_path: content_path.to_string(),
            });
        }

        Ok(order)
    }

    /// Append an entry to its owning directory's list.
    pub fn push(&mut self, item: SummaryItem) {
        let dir = owning_dir(&item.content_path).to_string();
        self.by_dir.entry(dir).or_default().push(item);
    }

    /// Entries owned by a directory.
    pub fn items(&self, dir: &str) -> &[SummaryItem] {
        self.by_dir.get(dir).map(Vec::as_slice).unwrap_or_default()
    }

    /// Zero-based position of a page within its owning directory.
    pub fn position(&self, content_path: &str) -> Option<usize> {
        self.items(owning_dir(content_path))
            .iter()
            .position(|item| item.content_path == content_path)
    }

    /// Number of directories with at least one entry.
    pub fn dir_count(&self) -> usize {
        self.by_dir.len()
    }

    /// Check whether no entries were found.
    pub fn is_empty(&self) -> bool {
        self.by_dir.is_empty()
    }
}

/// Directory whose listing a page belongs to.
///
/// A directory's index page is listed alongside its siblings, one level up.
pub fn owning_dir(content_path: &str) -> &str {
    let dir = dir_of(content_path);
    if base_name(content_path) == INDEX_FILE {
        dir_of(dir)
    } else {
        dir
    }
}
