//! Routing of source files by kind, and the file helpers the run uses.

use std::fs;
use std::io;
use std::path::Path;

use quire_page::{base_name, dir_of, INDEX_FILE};
use quire_rewrite::{legacy_asset_name, ASSETS_DIR, ASSET_STORE};

use crate::error::DocumentError;

/// Hugo's name for a section's own page.
pub const SECTION_INDEX_FILE: &str = "_index.md";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "svg", "gif"];

/// What to do with a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// Run through the rewrite pipeline, write to `target`
    Markdown { target: String },

    /// Copy byte for byte to `target`
    Asset { target: String },
}

/// Decide how a file is converted from its path relative to the source root.
///
/// Targets are relative to the section's output directory.
pub fn classify(content_path: &str) -> Result<FileKind, DocumentError> {
    match extension(content_path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => {
            let Some(rest) = content_path.strip_prefix(ASSET_STORE) else {
                return Err(DocumentError::AssetOutsideStore(content_path.to_string()));
            };
            Ok(FileKind::Asset {
                target: format!("{ASSETS_DIR}/{}", rest.trim_start_matches(['/', '\\'])),
            })
        }
        Some("md") => Ok(FileKind::Markdown {
            target: markdown_target(content_path),
        }),
        _ => {
            let legacy = content_path
                .strip_prefix(ASSET_STORE)
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(legacy_asset_name);
            match legacy {
                Some(name) => Ok(FileKind::Asset {
                    target: format!("{ASSETS_DIR}/{name}"),
                }),
                None => Err(DocumentError::UnknownFileType(content_path.to_string())),
            }
        }
    }
}

/// Output path of a page: `README.md` becomes the section's `_index.md`.
pub fn markdown_target(content_path: &str) -> String {
    if !base_name(content_path).eq_ignore_ascii_case(INDEX_FILE) {
        return content_path.to_string();
    }
    match dir_of(content_path) {
        "." => SECTION_INDEX_FILE.to_string(),
        dir => format!("{dir}/{SECTION_INDEX_FILE}"),
    }
}

fn extension(content_path: &str) -> Option<&str> {
    Path::new(base_name(content_path))
        .extension()
        .and_then(|e| e.to_str())
}

/// `/`-joined form of a relative path.
pub fn to_content_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Write a file, creating its parent directories.
pub fn write_file(to: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(to, data)
}

/// Copy a file, creating the destination's parent directories.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    let data = fs::read(from)?;
    write_file(to, &data)
}
