//! Document model types.
//!
//! Spans, lines and pages are the layout representation produced by a
//! [`SpanSource`](crate::parser::SpanSource). Outline and collection types are
//! the results the analysis stages build from them.

mod collection;
mod outline;
mod span;

pub use collection::{
    CollectionMetadata, CollectionReport, CollectionRequest, DocumentRef, JobToBeDone, Persona,
    SectionCandidate, SubsectionAnalysis,
};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use span::{normalize_line_text, round_font_size, Line, Page, Span};
