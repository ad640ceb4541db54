//! `{% name attrs %}` directives to Hugo Book shortcodes.
//!
//! The vocabulary is closed: a directive that is not listed here fails the
//! page instead of being passed through.

use quire_page::{Page, PatternCache};

use crate::embeds::{EmbedRegistry, VIDEO_EMBEDS};
use crate::traits::{Rewrite, RewriteContext, RewriteError};

const TAG_PATTERN: &str = r"\{%\s*([a-zA-Z0-9-]+)\s*(.*?)\s*%\}";

/// Tab titles folded to a canonical spelling when they match case-insensitively.
const CANONICAL_TAB_TITLES: &[&str] = &["macOS"];

/// Callout style of a `hint` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintStyle {
    Info,
    Warning,
    Danger,
    Success,
}

impl HintStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "danger" => Some(Self::Danger),
            "success" => Some(Self::Success),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Success => "success",
        }
    }
}

/// A recognized directive tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Tabs,
    EndTabs,
    Tab { title: String },
    EndTab,
    Hint { style: HintStyle },
    EndHint,
    Embed { url: String },
}

impl Directive {
    /// Parse a tag from its name and raw attribute text.
    pub fn parse(
        patterns: &PatternCache,
        tag: &str,
        name: &str,
        attrs: &str,
    ) -> Result<Self, RewriteError> {
        let bad_attributes = || RewriteError::BadAttributes {
            tag: tag.to_string(),
        };

        let directive = match name {
            "tabs" => Self::Tabs,
            "endtabs" => Self::EndTabs,
            "tab" => {
                let title = attribute(patterns, attrs, "title")?.ok_or_else(bad_attributes)?;
                Self::Tab {
                    title: canonical_tab_title(title.trim()),
                }
            }
            "endtab" => Self::EndTab,
            "hint" => {
                let style = attribute(patterns, attrs, "style")?
                    .and_then(|s| HintStyle::from_name(&s))
                    .ok_or_else(bad_attributes)?;
                Self::Hint { style }
            }
            "endhint" => Self::EndHint,
            "embed" => {
                let url = attribute(patterns, attrs, "url")?.ok_or_else(bad_attributes)?;
                Self::Embed {
                    url: url.trim().to_string(),
                }
            }
            _ => {
                return Err(RewriteError::UnknownDirective {
                    tag: tag.to_string(),
                })
            }
        };

        Ok(directive)
    }
}

/// Value of the single `key="value"` attribute in `attrs`.
fn attribute(
    patterns: &PatternCache,
    attrs: &str,
    key: &str,
) -> Result<Option<String>, RewriteError> {
    let pattern = format!(r#"^{}="(.*)"$"#, regex::escape(key));
    let m = patterns.submatches(&pattern, attrs.trim())?;
    Ok(m.group(1).map(str::to_string))
}

fn canonical_tab_title(title: &str) -> String {
    CANONICAL_TAB_TITLES
        .iter()
        .find(|canonical| canonical.eq_ignore_ascii_case(title))
        .map_or_else(|| title.to_string(), |canonical| canonical.to_string())
}

/// Rewrites directive tags and known video embed blocks.
#[derive(Debug, Clone, Default)]
pub struct Directives {
    embeds: EmbedRegistry,
}

impl Directives {
    pub fn new(embeds: EmbedRegistry) -> Self {
        Self { embeds }
    }

    fn render(
        &self,
        directive: Directive,
        tag: &str,
        tab_index: &mut usize,
    ) -> Result<String, RewriteError> {
        let out = match directive {
            Directive::Tabs => {
                *tab_index += 1;
                format!("{{{{< tabs id{} >}}}}", tab_index)
            }
            Directive::EndTabs => "{{< /tabs >}}".to_string(),
            Directive::Tab { title } => format!("{{{{< tab \"{}\" >}}}}", title),
            Directive::EndTab => "{{< /tab >}}".to_string(),
            Directive::Hint { style } => format!("{{{{< hint {} >}}}}", style.as_str()),
            Directive::EndHint => "{{< /hint >}}".to_string(),
            Directive::Embed { url } => {
                let title = self
                    .embeds
                    .title(&url)
                    .ok_or_else(|| RewriteError::UnknownEmbed {
                        tag: tag.to_string(),
                        url: url.clone(),
                    })?;
                format!("{{{{< biglink href=\"{}\" >}}}}{}{{{{< /biglink >}}}}", url, title)
            }
        };
        Ok(out)
    }
}

impl Rewrite for Directives {
    fn name(&self) -> &'static str {
        "directives"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        for video in VIDEO_EMBEDS {
            page.content = page.content.replace(&video.block(), &video.shortcode());
        }

        let mut tab_index = 0;
        page.content = ctx
            .patterns
            .try_replace_all(TAG_PATTERN, &page.content, |caps| {
                let tag = &caps[0];
                let name = &caps[1];
                let attrs = caps.get(2).map_or("", |m| m.as_str());

                let directive = Directive::parse(ctx.patterns, tag, name, attrs)?;
                self.render(directive, tag, &mut tab_index)
            })?;

        Ok(())
    }
}
