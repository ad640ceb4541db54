//! Error types for a conversion run.

use std::io;
use std::path::PathBuf;

use quire_page::{PageError, PatternError};
use quire_rewrite::RewriteError;

/// Errors that abort a single source file.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to load: {0}")]
    Read(#[source] io::Error),

    #[error("failed to copy: {0}")]
    Copy(#[source] io::Error),

    #[error("failed to write: {0}")]
    Write(#[source] io::Error),

    #[error("don't know where to move {0:?}")]
    AssetOutsideStore(String),

    #[error("don't know how to handle {0:?}")]
    UnknownFileType(String),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

/// Errors that can occur while writing a section index.
#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("failed to read existing index: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write index: {0}")]
    Write(#[source] io::Error),

    #[error("failed to render front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// A failure recorded during a run. None of these stop the run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read summary {path}: {source}")]
    Summary { path: PathBuf, source: io::Error },

    #[error("failed to parse summary {path}: {source}")]
    SummaryPattern { path: PathBuf, source: PatternError },

    #[error("failed to convert {path}: {source}")]
    Document { path: PathBuf, source: DocumentError },

    #[error("menu mapping missing for {dir}")]
    SectionMissing { dir: String },

    #[error("menu failed for {dir}: {source}")]
    SectionIndex { dir: String, source: SectionError },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to prepare output directory {path}: {source}")]
    Output { path: PathBuf, source: io::Error },

    #[error("failed to copy {path}: {source}")]
    Extra { path: PathBuf, source: io::Error },
}
