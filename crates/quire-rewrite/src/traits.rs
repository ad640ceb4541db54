//! Trait definitions for page rewriters.

use quire_page::{Page, PatternCache, PatternError};

/// Context shared by every rewriter during one conversion.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    /// Compiled pattern cache for the run
    pub patterns: &'a PatternCache,

    /// Site section the page is written to (e.g. "dcs")
    pub section: &'a str,
}

impl<'a> RewriteContext<'a> {
    pub fn new(patterns: &'a PatternCache, section: &'a str) -> Self {
        Self { patterns, section }
    }
}

/// Errors that can occur while rewriting a page.
///
/// Directive and reference errors mean the source uses markup nobody has
/// mapped yet; they carry the offending text so it can be triaged.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("unhandled directive: {tag}")]
    UnknownDirective { tag: String },

    #[error("unhandled directive attributes: {tag}")]
    BadAttributes { tag: String },

    #[error("no title known for embed {url:?}: {tag}")]
    UnknownEmbed { tag: String, url: String },

    #[error("content-ref link mismatch: {block}\nurl: {url:?}\nlink: {link:?}")]
    RefLinkMismatch {
        block: String,
        url: String,
        link: String,
    },

    #[error("content-ref title mismatch: {block}\ntitle: {title:?}\nexpected: {expected:?}")]
    RefTitleMismatch {
        block: String,
        title: String,
        expected: String,
    },
}

/// A single rewrite pass over a page.
pub trait Rewrite {
    /// Short identifier used in logs (e.g. "directives")
    fn name(&self) -> &'static str;

    /// Rewrite the page in place.
    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError>;
}
