//! Configuration file (quire.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use quire_convert::{ConvertConfig, SectionInfo, SectionTable};
use quire_rewrite::EmbedRegistry;

pub const DEFAULT_CONFIG_FILE: &str = "quire.toml";

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default = "default_sources", rename = "source")]
    pub sources: Vec<SourceConfig>,

    /// Extra section menu entries keyed by `<target>/<dir>`
    #[serde(default)]
    pub sections: BTreeMap<String, SectionEntry>,

    /// Extra embed titles keyed by URL
    #[serde(default)]
    pub embeds: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_extra_dir")]
    pub extra_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    pub dir: PathBuf,
    pub target: String,
    pub worktree: Option<WorktreeConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WorktreeConfig {
    pub path: PathBuf,
    pub branch: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionEntry {
    pub title: String,
    pub weight: i32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            sources: default_sources(),
            sections: BTreeMap::new(),
            embeds: BTreeMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            extra_dir: default_extra_dir(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_extra_dir() -> Option<PathBuf> {
    Some(PathBuf::from("content-extra"))
}
fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            dir: PathBuf::from("gitbook/dcs/docs"),
            target: "dcs".to_string(),
            worktree: Some(WorktreeConfig {
                path: PathBuf::from("gitbook/dcs"),
                branch: "origin/gitbook-sync".to_string(),
            }),
        },
        SourceConfig {
            dir: PathBuf::from("gitbook/node"),
            target: "node".to_string(),
            worktree: Some(WorktreeConfig {
                path: PathBuf::from("gitbook/node"),
                branch: "origin/gitbook-node-sync".to_string(),
            }),
        },
    ]
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Built-in section menu extended with configured entries.
    pub fn section_table(&self) -> SectionTable {
        let mut table = SectionTable::builtin();
        for (key, entry) in &self.sections {
            table.insert(key.clone(), SectionInfo::new(&entry.title, entry.weight));
        }
        table
    }

    /// Built-in embed titles extended with configured entries.
    pub fn embed_registry(&self) -> EmbedRegistry {
        let mut embeds = EmbedRegistry::builtin();
        for (url, title) in &self.embeds {
            embeds.insert(url.clone(), title.clone());
        }
        embeds
    }

    pub fn convert_config(&self, source: &SourceConfig) -> ConvertConfig {
        ConvertConfig {
            source_dir: source.dir.clone(),
            content_dir: self.output.content_dir.clone(),
            extra_dir: self.output.extra_dir.clone(),
            target_dir: source.target.clone(),
            ..ConvertConfig::default()
        }
    }
}

pub const DEFAULT_CONFIG: &str = r#"# Quire Configuration

[output]
# Hugo content directory, each source owns <content_dir>/<target>
content_dir = "content"

# Hand-written pages copied over the converted ones from <extra_dir>/<target>
extra_dir = "content-extra"

[[source]]
# GitBook tree holding SUMMARY.md
dir = "gitbook/dcs/docs"
# Section name in the generated site
target = "dcs"

# Reset before converting, unless --skip-worktree is given
[source.worktree]
path = "gitbook/dcs"
branch = "origin/gitbook-sync"

[[source]]
dir = "gitbook/node"
target = "node"

[source.worktree]
path = "gitbook/node"
branch = "origin/gitbook-node-sync"

# Menu entries for top-level directories, added to the built-in ones
# [sections."dcs/extra"]
# title = "Extra"
# weight = 100

# Titles for {% embed %} links, added to the built-in ones
# [embeds]
# "https://example.com/" = "Example"
"#;
