//! The conversion run for one GitBook source tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use quire_page::{
    assign_weight, lift_title, Page, PatternCache, SummaryOrder, WeightScheme, SUMMARY_FILE,
};
use quire_rewrite::{EmbedRegistry, Pipeline, RewriteContext, ASSETS_DIR};

use crate::assets::{
    classify, copy_file, markdown_target, to_content_path, write_file, FileKind,
    SECTION_INDEX_FILE,
};
use crate::error::{ConvertError, DocumentError, SectionError};
use crate::sections::{render_section_index, SectionInfo, SectionTable};

const GIT_DIR: &str = ".git";

/// Configuration for converting one source tree.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// GitBook source root, the directory holding `SUMMARY.md`
    pub source_dir: PathBuf,

    /// Hugo content directory
    pub content_dir: PathBuf,

    /// Hand-written pages overlaid from `<extra_dir>/<target_dir>`
    pub extra_dir: Option<PathBuf>,

    /// Section name under the content directory
    pub target_dir: String,

    /// Weights assigned from the listing order
    pub weights: WeightScheme,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("gitbook"),
            content_dir: PathBuf::from("content"),
            extra_dir: None,
            target_dir: "docs".to_string(),
            weights: WeightScheme::default(),
        }
    }
}

impl ConvertConfig {
    /// Directory this run owns and rewrites.
    pub fn output_dir(&self) -> PathBuf {
        self.content_dir.join(&self.target_dir)
    }
}

/// Result of a conversion run.
#[derive(Debug, Default)]
pub struct ConvertReport {
    /// Pages written
    pub pages: usize,

    /// Assets copied
    pub assets: usize,

    /// Section indices written
    pub sections: usize,

    /// Extra files overlaid
    pub extras: usize,

    pub duration_ms: u64,

    pub output_dir: PathBuf,

    /// Everything that went wrong, in the order it happened
    pub failures: Vec<ConvertError>,
}

impl ConvertReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, err: ConvertError) {
        tracing::warn!("{}", err);
        self.failures.push(err);
    }
}

/// A converted page and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    /// Path relative to the output directory
    pub target: String,

    pub text: String,
}

/// Converts a GitBook tree into a Hugo Book section.
pub struct Converter {
    config: ConvertConfig,
    patterns: PatternCache,
    pipeline: Pipeline,
    sections: SectionTable,
    order: SummaryOrder,
}

impl Converter {
    /// Create a converter with the built-in menu and embed titles.
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            patterns: PatternCache::new(),
            pipeline: Pipeline::default(),
            sections: SectionTable::builtin(),
            order: SummaryOrder::default(),
        }
    }

    pub fn with_sections(mut self, sections: SectionTable) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_embeds(mut self, embeds: EmbedRegistry) -> Self {
        self.pipeline = Pipeline::standard(embeds);
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Replace the listing order with one parsed from `SUMMARY.md` text.
    pub fn load_order(&mut self, summary: &str) -> Result<(), quire_page::PatternError> {
        self.order = SummaryOrder::parse(&self.patterns, summary)?;
        tracing::debug!("Indexed {} directories", self.order.dir_count());
        Ok(())
    }

    /// Convert one markdown document.
    ///
    /// `content_path` is relative to the source root.
    pub fn convert_document(
        &self,
        content_path: &str,
        raw: &str,
    ) -> Result<ConvertedDocument, DocumentError> {
        let mut page = Page::parse(content_path, raw);

        assign_weight(&self.patterns, &self.order, self.config.weights, &mut page)?;
        lift_title(&self.patterns, &mut page).map_err(quire_page::PageError::from)?;

        let ctx = RewriteContext::new(&self.patterns, &self.config.target_dir);
        self.pipeline.run(&mut page, &ctx)?;

        Ok(ConvertedDocument {
            target: markdown_target(content_path),
            text: page.serialize(),
        })
    }

    /// Run the whole conversion. Failures are collected, never fatal.
    pub fn run(&mut self) -> ConvertReport {
        let start = Instant::now();
        let output_dir = self.config.output_dir();
        let mut report = ConvertReport {
            output_dir: output_dir.clone(),
            ..ConvertReport::default()
        };

        tracing::info!(
            "Converting {} into {}",
            self.config.source_dir.display(),
            output_dir.display()
        );

        if let Err(source) = reset_dir(&output_dir) {
            report.record(ConvertError::Output {
                path: output_dir.clone(),
                source,
            });
        }

        self.create_order(&mut report);
        self.convert_files(&output_dir, &mut report);
        self.add_section_indices(&output_dir, &mut report);
        self.copy_extra(&output_dir, &mut report);

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Converted {} pages and {} assets in {}ms",
            report.pages,
            report.assets,
            report.duration_ms
        );
        report
    }

    fn create_order(&mut self, report: &mut ConvertReport) {
        let path = self.config.source_dir.join(SUMMARY_FILE);
        let summary = match fs::read_to_string(&path) {
            Ok(summary) => summary,
            Err(source) => {
                report.record(ConvertError::Summary { path, source });
                return;
            }
        };
        if let Err(source) = self.load_order(&summary) {
            report.record(ConvertError::SummaryPattern { path, source });
        }
    }

    fn convert_files(&self, output_dir: &Path, report: &mut ConvertReport) {
        let walker = WalkDir::new(&self.config.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != GIT_DIR);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = walk_error_path(&source, &self.config.source_dir);
                    report.record(ConvertError::Walk { path, source });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.config.source_dir)
                .unwrap_or(entry.path());
            let content_path = to_content_path(relative);
            tracing::debug!("  - {}", content_path);

            match self.convert_file(entry.path(), &content_path, output_dir) {
                Ok(FileKind::Markdown { .. }) => report.pages += 1,
                Ok(FileKind::Asset { .. }) => report.assets += 1,
                Err(source) => report.record(ConvertError::Document {
                    path: entry.path().to_path_buf(),
                    source,
                }),
            }
        }
    }

    fn convert_file(
        &self,
        full_path: &Path,
        content_path: &str,
        output_dir: &Path,
    ) -> Result<FileKind, DocumentError> {
        let kind = classify(content_path)?;
        match &kind {
            FileKind::Asset { target } => {
                copy_file(full_path, &output_dir.join(target)).map_err(DocumentError::Copy)?;
            }
            FileKind::Markdown { .. } => {
                let raw = fs::read_to_string(full_path).map_err(DocumentError::Read)?;
                let doc = self.convert_document(content_path, &raw)?;
                write_file(&output_dir.join(&doc.target), doc.text.as_bytes())
                    .map_err(DocumentError::Write)?;
            }
        }
        Ok(kind)
    }

    fn add_section_indices(&self, output_dir: &Path, report: &mut ConvertReport) {
        let dirs = match child_dirs(output_dir) {
            Ok(dirs) => dirs,
            Err(source) => {
                report.record(ConvertError::Output {
                    path: output_dir.to_path_buf(),
                    source,
                });
                return;
            }
        };

        for name in dirs.into_iter().filter(|name| name != ASSETS_DIR) {
            let key = format!("{}/{}", self.config.target_dir, name);
            let info = self.sections.get(&key);
            if info.is_none() {
                report.record(ConvertError::SectionMissing { dir: key.clone() });
            }

            let index_path = output_dir.join(&name).join(SECTION_INDEX_FILE);
            match self.write_section_index(&index_path, &name, info) {
                Ok(()) => report.sections += 1,
                Err(source) => report.record(ConvertError::SectionIndex { dir: key, source }),
            }
        }
    }

    fn write_section_index(
        &self,
        index_path: &Path,
        name: &str,
        info: Option<&SectionInfo>,
    ) -> Result<(), SectionError> {
        let existing = match fs::read_to_string(index_path) {
            Ok(raw) => Some(Page::parse(format!("{name}/{SECTION_INDEX_FILE}"), &raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(SectionError::Read(e)),
        };
        let text = render_section_index(&self.patterns, info, existing)?;
        write_file(index_path, text.as_bytes()).map_err(SectionError::Write)
    }

    fn copy_extra(&self, output_dir: &Path, report: &mut ConvertReport) {
        let Some(extra_dir) = &self.config.extra_dir else {
            return;
        };
        let source_dir = extra_dir.join(&self.config.target_dir);
        tracing::info!("Copying extra content from {}", source_dir.display());

        let walker = WalkDir::new(&source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != GIT_DIR);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = walk_error_path(&source, &source_dir);
                    report.record(ConvertError::Walk { path, source });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&source_dir).unwrap_or(entry.path());
            match copy_file(entry.path(), &output_dir.join(relative)) {
                Ok(()) => report.extras += 1,
                Err(source) => report.record(ConvertError::Extra {
                    path: entry.path().to_path_buf(),
                    source,
                }),
            }
        }
    }
}

fn reset_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(dir)
}

fn child_dirs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn walk_error_path(err: &walkdir::Error, root: &Path) -> PathBuf {
    err.path().unwrap_or(root).to_path_buf()
}
