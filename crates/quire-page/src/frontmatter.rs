//! Front matter synthesis: weights from the listing order and lifted titles.

use crate::page::Page;
use crate::pattern::{PatternCache, PatternError};
use crate::summary::{SummaryOrder, SUMMARY_FILE};

const HEADING_PATTERN: &str = r"(?m)^#[ \t]+([^\n]*?)[ \t]*$";

/// Errors that can occur when filling in front matter.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("order missing for {0}")]
    OrderMissing(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Linear weight assignment: `base + index * step`.
///
/// Gaps between consecutive weights leave room for hand-inserted pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightScheme {
    pub base: i32,
    pub step: i32,
}

impl Default for WeightScheme {
    fn default() -> Self {
        Self {
            base: -100,
            step: 10,
        }
    }
}

impl WeightScheme {
    /// Weight of the entry at `index`.
    pub fn weight(&self, index: usize) -> i32 {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.base.saturating_add(index.saturating_mul(self.step))
    }
}

/// Check whether the front matter defines `key` at the top level.
pub fn has_key(patterns: &PatternCache, page: &Page, key: &str) -> Result<bool, PatternError> {
    let pattern = format!(r"(?m)^{}[ \t]*:", regex::escape(key));
    patterns.is_match(&pattern, &page.front_matter)
}

/// Add `weight:` from the listing order, or `draft: true` to the listing itself.
pub fn assign_weight(
    patterns: &PatternCache,
    order: &SummaryOrder,
    scheme: WeightScheme,
    page: &mut Page,
) -> Result<(), PageError> {
    if page.content_path == SUMMARY_FILE {
        if !has_key(patterns, page, "draft")? {
            page.prepend_front_matter("draft: true");
        }
        return Ok(());
    }

    if has_key(patterns, page, "weight")? {
        return Ok(());
    }

    let index = order
        .position(&page.content_path)
        .ok_or_else(|| PageError::OrderMissing(page.content_path.clone()))?;
    page.prepend_front_matter(&format!("weight: {}", scheme.weight(index)));
    Ok(())
}

/// Promote the first `# Heading` to a quoted `title:` entry.
///
/// The heading stays in the body. Pages without a heading keep untitled
/// front matter.
pub fn lift_title(patterns: &PatternCache, page: &mut Page) -> Result<(), PatternError> {
    if has_key(patterns, page, "title")? {
        return Ok(());
    }

    let heading = patterns.submatches(HEADING_PATTERN, &page.content)?;
    let Some(title) = heading.group(1).filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    let line = format!("title: \"{}\"", quote_escape(title));
    page.prepend_front_matter(&line);
    Ok(())
}

fn quote_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryItem;
    use pretty_assertions::assert_eq;

    fn order(paths: &[&str]) -> SummaryOrder {
        let mut order = SummaryOrder::default();
        for path in paths {
            order.push(SummaryItem {
                title: path.to_string(),
                content_path: path.to_string(),
            });
        }
        order
    }

    #[test]
    fn weights_increase_in_listing_order() {
        let patterns = PatternCache::new();
        let paths = ["dir/a.md", "dir/b.md", "dir/c.md", "dir/d.md"];
        let order = order(&paths);

        let mut weights = Vec::new();
        for path in paths {
            let mut page = Page::parse(path, "body");
            assign_weight(&patterns, &order, WeightScheme::default(), &mut page).unwrap();
            weights.push(page.front_matter);
        }

        assert_eq!(
            weights,
            vec![
                "weight: -100\n",
                "weight: -90\n",
                "weight: -80\n",
                "weight: -70\n"
            ]
        );
    }

    #[test]
    fn custom_scheme() {
        let scheme = WeightScheme { base: 5, step: 3 };

        assert_eq!(scheme.weight(0), 5);
        assert_eq!(scheme.weight(4), 17);
    }

    #[test]
    fn listing_file_becomes_draft() {
        let patterns = PatternCache::new();
        let mut page = Page::parse(SUMMARY_FILE, "# Table of contents\n");

        assign_weight(&patterns, &SummaryOrder::default(), WeightScheme::default(), &mut page)
            .unwrap();
        assign_weight(&patterns, &SummaryOrder::default(), WeightScheme::default(), &mut page)
            .unwrap();

        assert_eq!(page.front_matter, "draft: true\n");
    }

    #[test]
    fn missing_order_is_an_error() {
        let patterns = PatternCache::new();
        let mut page = Page::parse("dir/unlisted.md", "body");

        let err = assign_weight(
            &patterns,
            &order(&["dir/a.md"]),
            WeightScheme::default(),
            &mut page,
        )
        .unwrap_err();

        assert!(matches!(err, PageError::OrderMissing(ref p) if p == "dir/unlisted.md"));
        assert_eq!(err.to_string(), "order missing for dir/unlisted.md");
    }

    #[test]
    fn existing_weight_is_kept() {
        let patterns = PatternCache::new();
        let mut page = Page::parse("dir/unlisted.md", "---\nweight: 3\n---\nbody");

        assign_weight(&patterns, &SummaryOrder::default(), WeightScheme::default(), &mut page)
            .unwrap();

        assert_eq!(page.front_matter, "weight: 3\n");
    }

    #[test]
    fn lifts_first_heading() {
        let patterns = PatternCache::new();
        let mut page = Page::parse(
            "x.md",
            "---\ndescription: d\n---\nIntro text\n\n# Set Up **Uplink**  \n\n# Second\n",
        );

        lift_title(&patterns, &mut page).unwrap();

        assert_eq!(
            page.front_matter,
            "title: \"Set Up **Uplink**\"\ndescription: d\n"
        );
        assert!(page.content.contains("# Set Up **Uplink**"));
    }

    #[test]
    fn ignores_lower_level_headings() {
        let patterns = PatternCache::new();
        let mut page = Page::parse("x.md", "## Sub\n\n# Top\n");

        lift_title(&patterns, &mut page).unwrap();

        assert_eq!(page.front_matter, "title: \"Top\"\n");
    }

    #[test]
    fn lifted_title_reads_back_verbatim() {
        let patterns = PatternCache::new();
        let heading = r#"What's "new" in C:\storj"#;
        let mut page = Page::parse("x.md", &format!("# {heading}\n"));

        lift_title(&patterns, &mut page).unwrap();

        let yaml: serde_yaml::Value = serde_yaml::from_str(&page.front_matter).unwrap();
        assert_eq!(yaml.get("title").and_then(|v| v.as_str()), Some(heading));
    }

    #[test]
    fn lifting_twice_is_a_no_op() {
        let patterns = PatternCache::new();
        let mut page = Page::parse("x.md", "# Title\n\nBody\n");

        lift_title(&patterns, &mut page).unwrap();
        let once = page.serialize();

        let mut again = Page::parse("x.md", &once);
        lift_title(&patterns, &mut again).unwrap();

        assert_eq!(again.serialize(), once);
    }

    #[test]
    fn existing_title_is_kept() {
        let patterns = PatternCache::new();
        let mut page = Page::parse("x.md", "---\ntitle: Keep\n---\n# Other\n");

        lift_title(&patterns, &mut page).unwrap();

        assert_eq!(page.front_matter, "title: Keep\n");
    }

    #[test]
    fn no_heading_no_title() {
        let patterns = PatternCache::new();
        let mut page = Page::parse("x.md", "Just text\n");

        lift_title(&patterns, &mut page).unwrap();

        assert_eq!(page.front_matter, "");
    }
}
