//! GitBook to Hugo Book conversion.
//!
//! A [`Converter`] walks one GitBook source tree, rewrites every markdown
//! page through the [`quire_rewrite::Pipeline`], relocates uploaded images,
//! and writes a section index for each top-level directory.

pub mod assets;
pub mod converter;
pub mod error;
pub mod sections;

pub use assets::{classify, markdown_target, FileKind, SECTION_INDEX_FILE};
pub use converter::{ConvertConfig, ConvertReport, ConvertedDocument, Converter};
pub use error::{ConvertError, DocumentError, SectionError};
pub use sections::{render_section_index, section_front_matter, SectionInfo, SectionTable};
