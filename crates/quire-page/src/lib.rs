//! GitBook page model with SUMMARY.md ordering.
//!
//! This crate provides the text-level building blocks of a conversion: a
//! cache of compiled patterns, the front matter / body split of a page, and
//! the per-directory ordering read from the listing file.

pub mod frontmatter;
pub mod page;
pub mod pattern;
pub mod summary;

pub use frontmatter::{assign_weight, has_key, lift_title, PageError, WeightScheme};
pub use page::{base_name, clean_path, dir_of, Page, FRONT_MATTER_DELIMITER};
pub use pattern::{PatternCache, PatternError, Submatches};
pub use summary::{owning_dir, SummaryItem, SummaryOrder, INDEX_FILE, SUMMARY_FILE};
