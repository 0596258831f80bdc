//! # docoutline
//!
//! Heading outline extraction and persona-driven section ranking for PDFs.
//!
//! The library reads text runs with their font sizes and positions from a
//! document and turns them into a title plus an H1–H4 outline, or ranks the
//! sections of several documents for a persona and pulls a short excerpt
//! below each one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{extract_outline_from_file, render};
//!
//! fn main() -> docoutline::Result<()> {
//!     let outline = extract_outline_from_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline mode**: title and heading hierarchy from font sizes and numbering
//! - **Collection mode**: cross-document section ranking with excerpts
//! - **Batch processing**: whole directories, in parallel with Rayon
//! - **Pluggable sources**: any [`SpanSource`](parser::SpanSource), lopdf by default
//! - **Corpus rules**: document-class special cases loadable from JSON

pub mod analysis;
pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod persona;
pub mod render;

// Re-export commonly used types
pub use analysis::{CorpusRules, OutlineExtractor, OutlineOptions};
pub use batch::{process_directory, BatchOptions, BatchSummary};
pub use error::{Error, Result};
pub use model::{
    CollectionReport, CollectionRequest, DocumentOutline, HeadingLevel, Line, OutlineEntry, Page,
    SectionCandidate, Span, SubsectionAnalysis,
};
pub use parser::{MemorySource, ParseOptions, PdfSpanSource, SpanSource};
pub use persona::{analyze_collection, write_report, CollectionAnalyzer, RankOptions};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_outline_from_file;
///
/// let outline = extract_outline_from_file("document.pdf").unwrap();
/// println!("{}", outline.title);
/// ```
pub fn extract_outline_from_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    extract_outline_from_file_with_options(path, &OutlineOptions::default())
}

/// Extract the title and outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use docoutline::{extract_outline_from_file_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new().without_corpus_rules();
/// let outline = extract_outline_from_file_with_options("document.pdf", &options).unwrap();
/// ```
pub fn extract_outline_from_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<DocumentOutline> {
    let source = PdfSpanSource::open_with_options(path, ParseOptions::new().lenient())?;
    OutlineExtractor::new(options.clone()).try_extract(&source)
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let source = PdfSpanSource::from_bytes_with_options(data, ParseOptions::new().lenient())?;
    OutlineExtractor::default().try_extract(&source)
}

/// Convert a PDF file to outline JSON.
///
/// # Example
///
/// ```no_run
/// use docoutline::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline_from_file(path)?;
    render::to_json(&outline, format)
}
