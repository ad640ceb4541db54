//! Fixed-order rewrite pipeline.

use quire_page::Page;

use crate::cleanup::{EncodedSpace, Emphasis, Math, TrailingSpace};
use crate::content_ref::ContentRefs;
use crate::directive::Directives;
use crate::embeds::EmbedRegistry;
use crate::links::{ImageLinks, ReadmeLinks, RegularLinks};
use crate::traits::{Rewrite, RewriteContext, RewriteError};

/// Ordered list of rewrite passes applied to every page body.
pub struct Pipeline {
    stages: Vec<Box<dyn Rewrite>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard(EmbedRegistry::builtin())
    }
}

impl Pipeline {
    /// The GitBook to Hugo Book pipeline.
    ///
    /// Content-ref blocks go first so their inner tags never reach the
    /// directive pass. `&#x20;` is removed before `****` is collapsed, and
    /// trailing whitespace is stripped after both.
    pub fn standard(embeds: EmbedRegistry) -> Self {
        Self {
            stages: vec![
                Box::new(ContentRefs),
                Box::new(Directives::new(embeds)),
                Box::new(EncodedSpace),
                Box::new(Emphasis),
                Box::new(TrailingSpace),
                Box::new(ReadmeLinks),
                Box::new(ImageLinks),
                Box::new(RegularLinks),
                Box::new(Math),
            ],
        }
    }

    /// Run every stage in order, stopping at the first failure.
    pub fn run(&self, page: &mut Page, ctx: &RewriteContext<'_>) -> Result<(), RewriteError> {
        for stage in &self.stages {
            stage.rewrite(page, ctx)?;
        }
        Ok(())
    }

    /// Stage names in run order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_page::PatternCache;

    const SOURCE: &str = r#"# Set Up Restic

{% hint style="info" %}
Needs an [access grant](../getting-started/access.md).&#x20;
{% endhint %}

{% tabs %}
{% tab title="macos" %}
![Terminal](<../.gitbook/assets/image (12).png>)
{% endtab %}
{% endtabs %}

{% content-ref url="../concepts/" %}
[concepts](../concepts/)
{% endcontent-ref %}

Click **** Save and read the [overview](README.md).

$$
x = 1
$$
"#;

    const EXPECTED: &str = r#"# Set Up Restic

{{< hint info >}}
Needs an [access grant](/getting-started/access.md).
{{< /hint >}}

{{< tabs id1 >}}
{{< tab "macOS" >}}
![Terminal](</dcs/_assets/image (12).png>)
{{< /tab >}}
{{< /tabs >}}

{{< biglink relref="/concepts/_index.md" />}}

Click Save and read the [overview](_index.md).

{{< katex display >}}
x = 1
{{< /katex >}}
"#;

    #[test]
    fn converts_full_page() {
        let patterns = PatternCache::new();
        let ctx = RewriteContext::new(&patterns, "dcs");
        let mut page = Page::parse("how-tos/restic.md", SOURCE);

        Pipeline::default().run(&mut page, &ctx).unwrap();

        assert_eq!(page.content, EXPECTED);
    }

    #[test]
    fn output_is_a_fixed_point() {
        let patterns = PatternCache::new();
        let ctx = RewriteContext::new(&patterns, "dcs");
        let pipeline = Pipeline::default();

        let mut page = Page::parse("how-tos/restic.md", SOURCE);
        pipeline.run(&mut page, &ctx).unwrap();
        let once = page.serialize();

        let mut again = Page::parse("how-tos/restic.md", &once);
        pipeline.run(&mut again, &ctx).unwrap();

        assert_eq!(again.serialize(), once);
    }

    fn run_default(content_path: &str, source: &str) -> String {
        let patterns = PatternCache::new();
        let ctx = RewriteContext::new(&patterns, "dcs");
        let mut page = Page::parse(content_path, source);
        Pipeline::default().run(&mut page, &ctx).unwrap();
        page.content
    }

    #[test]
    fn encoded_space_after_empty_emphasis_keeps_words_apart() {
        assert_eq!(run_default("x.md", "Click ****&#x20;Save\n"), "Click Save\n");
        assert_eq!(run_default("x.md", "Then **** &#x20;Go\n"), "Then Go\n");
    }

    #[test]
    fn emphasis_at_line_end_leaves_no_trailing_space() {
        let once = run_default("x.md", "Press ****\nnext **** \n");

        assert_eq!(once, "Press\nnext\n");
        assert_eq!(run_default("x.md", &once), once);
    }

    #[test]
    fn rewrites_every_adjacent_link() {
        assert_eq!(
            run_default("a/b.md", "[A](../x.md)[B](../y.md)\n"),
            "[A](/x.md)[B](/y.md)\n"
        );
        assert_eq!(
            run_default("a/b.md", "[![Logo](../.gitbook/assets/logo.png)](../x.md)\n"),
            "[![Logo](/dcs/_assets/logo.png)](/x.md)\n"
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let patterns = PatternCache::new();
        let ctx = RewriteContext::new(&patterns, "dcs");
        let mut page = Page::parse("x.md", "{% unknown %}\n![a](.gitbook/assets/a.png)\n");

        let err = Pipeline::default().run(&mut page, &ctx).unwrap_err();

        assert!(matches!(err, RewriteError::UnknownDirective { .. }));
        assert_eq!(page.content, "{% unknown %}\n![a](.gitbook/assets/a.png)\n");
    }

    #[test]
    fn stage_order() {
        assert_eq!(
            Pipeline::default().stage_names(),
            vec![
                "content-refs",
                "directives",
                "encoded-space",
                "emphasis",
                "trailing-space",
                "readme-links",
                "image-links",
                "regular-links",
                "math"
            ]
        );
    }
}
