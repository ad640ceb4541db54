//! Rewriters turning GitBook markup into Hugo Book markup.
//!
//! Each pass implements [`Rewrite`] and edits a page body in place. The
//! [`Pipeline`] runs them in the order the conversion depends on.

pub mod cleanup;
pub mod content_ref;
pub mod directive;
pub mod embeds;
pub mod links;
pub mod pipeline;
pub mod traits;

pub use cleanup::{EncodedSpace, Emphasis, Math, TrailingSpace};
pub use content_ref::{ContentRefs, BROKEN_REFERENCE};
pub use directive::{Directive, Directives, HintStyle};
pub use embeds::{EmbedRegistry, VideoEmbed, VIDEO_EMBEDS};
pub use links::{
    abs_ref, is_external, legacy_asset_name, near_ref, rewrite_image_target, ImageLinks,
    ReadmeLinks, RegularLinks, ASSETS_DIR, ASSET_STORE, LEGACY_ASSET_NAMES,
};
pub use pipeline::Pipeline;
pub use traits::{Rewrite, RewriteContext, RewriteError};
