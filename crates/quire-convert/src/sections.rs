//! Top-level section menu entries and their `_index.md` files.

use std::collections::HashMap;

use serde::Serialize;

use quire_page::{Page, PatternCache, FRONT_MATTER_DELIMITER};

use crate::error::SectionError;

/// Menu metadata for one top-level section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    pub title: String,
    pub weight: i32,
}

impl SectionInfo {
    pub fn new(title: impl Into<String>, weight: i32) -> Self {
        Self {
            title: title.into(),
            weight,
        }
    }
}

const BUILTIN_SECTIONS: &[(&str, &str, i32)] = &[
    ("dcs/storage", "Decentralized Cloud Storage", 10),
    ("dcs/downloads", "Downloads", 20),
    ("dcs/getting-started", "Getting Started", 30),
    ("dcs/api-reference", "SDK & Reference", 40),
    ("dcs/how-tos", "How To's", 50),
    ("dcs/solution-architectures", "Solution Architectures", 60),
    ("dcs/concepts", "Concepts", 70),
    ("dcs/support", "Support", 80),
    (
        "dcs/billing-payment-and-accounts-1",
        "Billing, Payment & Accounts",
        90,
    ),
    ("node/before-you-begin", "Before You Begin", 10),
    ("node/dependencies", "Dependencies", 20),
    ("node/setup", "Setup", 30),
    ("node/sno-applications", "SNO Applications", 40),
    ("node/resources", "Resources", 50),
    ("node/solution-architectures", "Solution Architectures", 60),
];

/// Section metadata keyed by `<target>/<dir>`.
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    entries: HashMap<String, SectionInfo>,
}

impl SectionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The menu shipped with the converter.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (key, title, weight) in BUILTIN_SECTIONS {
            table.insert(*key, SectionInfo::new(*title, *weight));
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, info: SectionInfo) {
        self.entries.insert(key.into(), info);
    }

    pub fn get(&self, key: &str) -> Option<&SectionInfo> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionFrontMatter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<i32>,
    book_flat_section: bool,
}

/// Front matter lines for a section index, without delimiters.
pub fn section_front_matter(info: Option<&SectionInfo>) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&SectionFrontMatter {
        title: info.map(|i| i.title.as_str()),
        weight: info.map(|i| i.weight),
        book_flat_section: true,
    })
}

const MENU_KEYS_PATTERN: &str = r"(?m)^(?:title|weight|bookFlatSection)[ \t]*:[^\n]*\n";
const FLAT_KEY_PATTERN: &str = r"(?m)^bookFlatSection[ \t]*:[^\n]*\n";

/// Render a section's `_index.md`.
///
/// When the section already has a converted index page its body is kept.
/// Menu keys from the table replace the page's own `title` and `weight`;
/// without a table entry only `bookFlatSection` is added.
pub fn render_section_index(
    patterns: &PatternCache,
    info: Option<&SectionInfo>,
    existing: Option<Page>,
) -> Result<String, SectionError> {
    let front = section_front_matter(info)?;

    let Some(mut page) = existing else {
        return Ok(format!(
            "{FRONT_MATTER_DELIMITER}{front}{FRONT_MATTER_DELIMITER}"
        ));
    };

    let replaced = if info.is_some() {
        MENU_KEYS_PATTERN
    } else {
        FLAT_KEY_PATTERN
    };
    let rest = patterns.replace_all(replaced, &page.front_matter, "")?;
    page.front_matter = format!("{front}{rest}");
    Ok(page.serialize())
}
