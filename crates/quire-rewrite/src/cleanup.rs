//! Body cleanups for GitBook export artifacts, and math blocks.

use quire_page::Page;

use crate::traits::{Rewrite, RewriteContext, RewriteError};

const ENCODED_SPACE_PATTERN: &str = r" ?&#x20;";
const TRAILING_SPACE_PATTERN: &str = r"(?m)[ \t]+$";
const SPACED_STARS_PATTERN: &str = r"( *\*\*\*\* +| +\*\*\*\* *)";
const STARS_PATTERN: &str = r"\*\*\*\*";
const MATH_PATTERN: &str = r"\$\$\n(.*)\n\$\$";

/// Collapses the empty `****` emphasis GitBook leaves behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emphasis;

impl Rewrite for Emphasis {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        let content = ctx
            .patterns
            .replace_all(SPACED_STARS_PATTERN, &page.content, " ")?;
        page.content = ctx.patterns.replace_all(STARS_PATTERN, &content, "")?;
        Ok(())
    }
}

/// Removes the `&#x20;` artifacts GitBook writes for significant spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodedSpace;

impl Rewrite for EncodedSpace {
    fn name(&self) -> &'static str {
        "encoded-space"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        page.content = ctx
            .patterns
            .replace_all(ENCODED_SPACE_PATTERN, &page.content, "")?;
        Ok(())
    }
}

/// Strips trailing whitespace from every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSpace;

impl Rewrite for TrailingSpace {
    fn name(&self) -> &'static str {
        "trailing-space"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        page.content = ctx
            .patterns
            .replace_all(TRAILING_SPACE_PATTERN, &page.content, "")?;
        Ok(())
    }
}

/// `$$` display math blocks to the `katex` shortcode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Math;

impl Rewrite for Math {
    fn name(&self) -> &'static str {
        "math"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        page.content = ctx.patterns.replace_all(
            MATH_PATTERN,
            &page.content,
            "{{< katex display >}}\n${1}\n{{< /katex >}}",
        )?;
        Ok(())
    }
}
