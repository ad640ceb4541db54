//! Image and hyperlink target rewriting.

use regex::Captures;

use quire_page::{clean_path, dir_of, Page};

use crate::traits::{Rewrite, RewriteContext, RewriteError};

/// Directory GitBook keeps uploaded images in.
pub const ASSET_STORE: &str = ".gitbook/assets";

/// Flat per-section asset directory in the generated site.
pub const ASSETS_DIR: &str = "_assets";

/// Uploads GitBook stored without a file extension.
pub const LEGACY_ASSET_NAMES: [&str; 4] = ["0", "1", "2", "3"];

const README_LINK_PATTERN: &str = r"README\.md\)";
const IMAGE_PATTERN: &str = r"!\[([^\]]*)\]\((<[^>]*>|[^\)]*)\)";
const LINK_PATTERN: &str =
    r"\[((?:!\[[^\]]*\]\((?:<[^>]*>|[^\)]*)\)|[^\]])*)\]\((<[^>]*>|[^\)]*)\)";

/// Renamed copy of a legacy extension-less upload, if `name` is one.
pub fn legacy_asset_name(name: &str) -> Option<String> {
    LEGACY_ASSET_NAMES
        .contains(&name)
        .then(|| format!("{name}-fix.png"))
}

/// Check whether a target is absolute or points off-site.
pub fn is_external(target: &str) -> bool {
    target.starts_with("http") || target.starts_with('/') || has_scheme(target)
}

fn has_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Resolve a link target written relative to `content_path`.
///
/// Targets climbing out of the page's directory become site-rooted; other
/// relative targets are left for Hugo to resolve against the page.
pub fn near_ref(content_path: &str, target: &str) -> String {
    if is_external(target) || !target.starts_with("../") {
        return target.to_string();
    }
    abs_ref(content_path, target)
}

/// Site-rooted path of a target relative to `content_path`.
pub fn abs_ref(content_path: &str, target: &str) -> String {
    if is_external(target) {
        return target.to_string();
    }
    let dir = dir_of(content_path);
    let joined = if dir == "." {
        target.to_string()
    } else {
        format!("{dir}/{target}")
    };
    format!("/{}", clean_path(&joined).trim_start_matches('/'))
}

/// Split `<target>` into the inner target and whether it was wrapped.
fn unwrap_angle(target: &str) -> (&str, bool) {
    match target
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
    {
        Some(inner) => (inner, true),
        None => (target, false),
    }
}

fn wrap_angle(target: String, angled: bool) -> String {
    if angled {
        format!("<{target}>")
    } else {
        target
    }
}

/// New target for an image, relocating uploads into the section asset directory.
pub fn rewrite_image_target(target: &str, section: &str) -> String {
    let target = target.replace("\\_", "_");
    let (inner, angled) = unwrap_angle(&target);

    let url = match inner.find(ASSET_STORE) {
        Some(pos) => {
            let mut rest = inner[pos + ASSET_STORE.len()..].to_string();
            if let Some(fixed) = rest.strip_prefix('/').and_then(legacy_asset_name) {
                rest = format!("/{fixed}");
            }
            format!("/{section}/{ASSETS_DIR}{rest}")
        }
        None => inner.to_string(),
    };

    wrap_angle(url, angled)
}

/// Points `README.md` links at Hugo's `_index.md`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadmeLinks;

impl Rewrite for ReadmeLinks {
    fn name(&self) -> &'static str {
        "readme-links"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        page.content = ctx
            .patterns
            .replace_all(README_LINK_PATTERN, &page.content, "_index.md)")?;
        Ok(())
    }
}

/// Rewrites `![alt](target)` image targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLinks;

impl Rewrite for ImageLinks {
    fn name(&self) -> &'static str {
        "image-links"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        let rx = ctx.patterns.compile(IMAGE_PATTERN)?;
        page.content = rx
            .replace_all(&page.content, |caps: &Captures<'_>| {
                format!(
                    "![{}]({})",
                    &caps[1],
                    rewrite_image_target(&caps[2], ctx.section)
                )
            })
            .into_owned();
        Ok(())
    }
}

/// Rewrites `[text](target)` hyperlink targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegularLinks;

impl Rewrite for RegularLinks {
    fn name(&self) -> &'static str {
        "regular-links"
    }

    fn rewrite(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        let rx = ctx.patterns.compile(LINK_PATTERN)?;
        let content_path = page.content_path.as_str();
        let text = page.content.as_str();
        let content = rx
            .replace_all(text, |caps: &Captures<'_>| {
                let whole = &caps[0];
                let is_image = caps
                    .get(0)
                    .is_some_and(|m| text[..m.start()].ends_with('!'));
                let target = &caps[2];
                if is_image || is_external(target) {
                    return whole.to_string();
                }
                let (inner, angled) = unwrap_angle(target);
                format!(
                    "[{}]({})",
                    &caps[1],
                    wrap_angle(near_ref(content_path, inner), angled)
                )
            })
            .into_owned();
        page.content = content;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_page::PatternCache;

    fn apply(rewriter: &dyn Rewrite, path: &str, content: &str) -> String {
        let patterns = PatternCache::new();
        let ctx = RewriteContext::new(&patterns, "dcs");
        let mut page = Page::parse(path, content);
        rewriter.rewrite(&mut page, &ctx).unwrap();
        page.content
    }

    #[test]
    fn relocates_store_images() {
        let out = apply(
            &ImageLinks,
            "concepts/page.md",
            "![Diagram](../.gitbook/assets/image%20%283%29.png)\n",
        );

        assert_eq!(out, "![Diagram](/dcs/_assets/image%20%283%29.png)\n");
    }

    #[test]
    fn keeps_angle_brackets() {
        let out = apply(
            &ImageLinks,
            "a/b.md",
            "![](<../../.gitbook/assets/Screen Shot 2021.png>)",
        );

        assert_eq!(out, "![](</dcs/_assets/Screen Shot 2021.png>)");
    }

    #[test]
    fn unescapes_underscores() {
        let out = apply(
            &ImageLinks,
            "a.md",
            "![x](.gitbook/assets/my\\_image\\_1.png)",
        );

        assert_eq!(out, "![x](/dcs/_assets/my_image_1.png)");
    }

    #[test]
    fn legacy_images_get_extension() {
        for name in LEGACY_ASSET_NAMES {
            assert_eq!(
                rewrite_image_target(&format!("../.gitbook/assets/{name}"), "node"),
                format!("/node/_assets/{name}-fix.png")
            );
        }
        assert_eq!(
            rewrite_image_target(".gitbook/assets/4", "node"),
            "/node/_assets/4"
        );
    }

    #[test]
    fn leaves_other_images() {
        let source = "![logo](https://example.com/logo.png) ![local](img/a.png)";

        assert_eq!(apply(&ImageLinks, "a.md", source), source);
    }

    #[test]
    fn parent_links_become_absolute() {
        let out = apply(
            &RegularLinks,
            "how-tos/backups/restic.md",
            "See [Uplink](../../getting-started/uplink.md#install) for details.",
        );

        assert_eq!(
            out,
            "See [Uplink](/getting-started/uplink.md#install) for details."
        );
    }

    #[test]
    fn link_at_start_of_page() {
        let out = apply(&RegularLinks, "a/b.md", "[Up](../c.md)");

        assert_eq!(out, "[Up](/c.md)");
    }

    #[test]
    fn adjacent_links() {
        let out = apply(&RegularLinks, "a/b.md", "[A](../x.md)[B](../y.md)\n");

        assert_eq!(out, "[A](/x.md)[B](/y.md)\n");
    }

    #[test]
    fn link_wrapping_an_image() {
        let out = apply(
            &RegularLinks,
            "a/b.md",
            "[![Logo](</dcs/_assets/logo (1).png>)](../x.md)\n",
        );

        assert_eq!(out, "[![Logo](</dcs/_assets/logo (1).png>)](/x.md)\n");
    }

    #[test]
    fn link_after_image() {
        let out = apply(&RegularLinks, "a/b.md", "![pic](../x.png)[Up](../c.md)");

        assert_eq!(out, "![pic](../x.png)[Up](/c.md)");
    }

    #[test]
    fn angle_wrapped_links() {
        let out = apply(&RegularLinks, "a/b.md", "x [Up](<../c d.md>)");

        assert_eq!(out, "x [Up](</c d.md>)");
    }

    #[test]
    fn leaves_external_and_sibling_links() {
        let source = "a [web](https://storj.io) b [mail](mailto:hi@storj.io) c [abs](/dcs/x) d [sib](setup.md) e [anchor](#top)";

        assert_eq!(apply(&RegularLinks, "a/b.md", source), source);
    }

    #[test]
    fn skips_images() {
        let source = "![pic](../x.png)";

        assert_eq!(apply(&RegularLinks, "a/b.md", source), source);
    }

    #[test]
    fn readme_links_point_at_index() {
        let out = apply(
            &ReadmeLinks,
            "a.md",
            "[Start](getting-started/README.md) and [Root](README.md)",
        );

        assert_eq!(
            out,
            "[Start](getting-started/_index.md) and [Root](_index.md)"
        );
    }

    #[test]
    fn reference_resolution() {
        assert_eq!(near_ref("a/b.md", "../c.md"), "/c.md");
        assert_eq!(near_ref("a/b.md", "c.md"), "c.md");
        assert_eq!(near_ref("a/b.md", "http://x"), "http://x");
        assert_eq!(abs_ref("a/b.md", "c.md"), "/a/c.md");
        assert_eq!(abs_ref("b.md", "c.md"), "/c.md");
        assert_eq!(abs_ref("a/b.md", "/x"), "/x");
    }

    #[test]
    fn detects_external_targets() {
        assert!(is_external("https://storj.io"));
        assert!(is_external("mailto:a@b"));
        assert!(is_external("/abs"));
        assert!(!is_external("../up.md"));
        assert!(!is_external("dir/page.md"));
        assert!(!is_external("#anchor"));
    }
}
