//! Multi-line `content-ref` blocks to `biglink` shortcodes.
//!
//! ```text
//! {% content-ref url="before-you-begin/auth-token.md" %}
//! [auth-token.md](before-you-begin/auth-token.md)
//! {% endcontent-ref %}
//! ```
//!
//! GitBook writes the url twice and the link text is always the target's
//! file name. Anything else means the block was edited by hand and has to
//! be looked at.

use quire_page::{base_name, dir_of, Page};

use crate::links::near_ref;
use crate::traits::{Rewrite, RewriteContext, RewriteError};

const CONTENT_REF_PATTERN: &str = concat!(
    r#"\{%\s+content-ref url="([^"]+)"\s+%\}\n"#,
    r"\[([^\]]+)\]\(([^)]+)\)\n",
    r"\{%\s+endcontent-ref\s+%\}",
);

/// Url GitBook writes when the referenced page no longer exists.
pub const BROKEN_REFERENCE: &str = "broken-reference";

/// Rewrites `content-ref` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRefs;

impl Rewrite for ContentRefs {
    fn name(&self) -> &'static str {
        "content-refs"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        let content_path = page.content_path.clone();
        page.content = ctx
            .patterns
            .try_replace_all(CONTENT_REF_PATTERN, &page.content, |caps| {
                resolve(&content_path, &caps[0], &caps[1], &caps[2], &caps[3])
            })?;
        Ok(())
    }
}

fn resolve(
    content_path: &str,
    block: &str,
    url: &str,
    title: &str,
    link: &str,
) -> Result<String, RewriteError> {
    if url == BROKEN_REFERENCE {
        return Ok("{{< biglink >}}Broken Reference{{< /biglink >}}".to_string());
    }

    let mut reference = url.trim().to_string();
    let expected = if url.ends_with('/') {
        reference.push_str("_index.md");
        base_name(dir_of(link))
    } else {
        base_name(link)
    };

    if url != link {
        return Err(RewriteError::RefLinkMismatch {
            block: block.to_string(),
            url: url.to_string(),
            link: link.to_string(),
        });
    }
    if title != expected {
        return Err(RewriteError::RefTitleMismatch {
            block: block.to_string(),
            title: title.to_string(),
            expected: expected.to_string(),
        });
    }

    let mut reference = near_ref(content_path, &reference);
    if let Some(dir) = reference.strip_suffix(quire_page::INDEX_FILE) {
        reference = format!("{dir}_index.md");
    }

    Ok(format!("{{{{< biglink relref=\"{}\" />}}}}", reference))
}
