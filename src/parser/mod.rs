//! Span sources: turning documents into pages of positioned text runs.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{decode_text_simple, MemorySource, SpanSource};
pub use layout::{group_runs_into_lines, LayoutExtractor, PositionedRun};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfSpanSource;
