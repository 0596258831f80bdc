//! Multi-document section ranking for a persona.
//!
//! Every requested document is read independently (in parallel unless
//! disabled); candidates are then pooled in request order, ranked globally,
//! and an excerpt is taken below each selected heading.

mod excerpt;
mod options;
mod ranker;

pub use excerpt::{extract_excerpt, find_case_insensitive};
pub use options::{ExcerptOptions, RankOptions, RankRule};
pub use ranker::{heading_candidates, rank_document, select_sections, HeadingCandidate};

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::model::{
    CollectionMetadata, CollectionReport, CollectionRequest, DocumentRef, SectionCandidate,
    SubsectionAnalysis,
};
use crate::parser::{ParseOptions, PdfSpanSource, SpanSource};
use crate::render::{to_json, JsonFormat};

/// Indentation of written collection reports.
pub const REPORT_INDENT: usize = 4;

struct LoadedDocument {
    filename: String,
    candidates: Vec<HeadingCandidate>,
}

/// Ranks sections across the documents of a collection request.
#[derive(Debug, Clone, Default)]
pub struct CollectionAnalyzer {
    options: RankOptions,
}

impl CollectionAnalyzer {
    /// Create an analyzer.
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// Analyze a request, stamping the report with the current local time.
    ///
    /// `open` is called for each requested file name, and again for each
    /// document an excerpt is taken from. Documents it fails to open or read
    /// are skipped.
    pub fn analyze<S, F>(&self, request: &CollectionRequest, open: F) -> CollectionReport
    where
        S: SpanSource,
        F: Fn(&str) -> Result<S> + Sync,
    {
        self.analyze_at(request, open, current_timestamp())
    }

    /// Analyze a request with an explicit processing timestamp.
    pub fn analyze_at<S, F>(
        &self,
        request: &CollectionRequest,
        open: F,
        timestamp: impl Into<String>,
    ) -> CollectionReport
    where
        S: SpanSource,
        F: Fn(&str) -> Result<S> + Sync,
    {
        let load = |doc: &DocumentRef| self.load(doc, &open);
        // Candidate lists are joined in request order before ranking
        let loaded: Vec<LoadedDocument> = if self.options.parallel {
            request.documents.par_iter().filter_map(load).collect()
        } else {
            request.documents.iter().filter_map(load).collect()
        };

        let pooled: Vec<SectionCandidate> = loaded
            .iter()
            .flat_map(|doc| rank_document(&doc.filename, &doc.candidates, &self.options))
            .collect();
        let sections = select_sections(pooled, &self.options);

        let mut sources: HashMap<String, Option<S>> = HashMap::new();
        let subsections = sections
            .iter()
            .map(|section| {
                let source = sources
                    .entry(section.document.clone())
                    .or_insert_with(|| open(&section.document).ok());
                SubsectionAnalysis {
                    document: section.document.clone(),
                    refined_text: source
                        .as_ref()
                        .map(|source| self.excerpt(source, section))
                        .unwrap_or_default(),
                    page_number: section.page_number,
                }
            })
            .collect();

        CollectionReport {
            metadata: CollectionMetadata {
                input_documents: request.filenames(),
                persona: request.persona.role.clone(),
                job_to_be_done: request.job_to_be_done.task.clone(),
                processing_timestamp: timestamp.into(),
            },
            extracted_sections: sections,
            subsection_analysis: subsections,
        }
    }

    fn load<S, F>(&self, doc: &DocumentRef, open: &F) -> Option<LoadedDocument>
    where
        S: SpanSource,
        F: Fn(&str) -> Result<S>,
    {
        match open(&doc.filename).and_then(|source| source.pages()) {
            Ok(pages) => {
                let candidates = heading_candidates(&pages, &self.options);
                log::debug!("{}: {} heading candidates", doc.filename, candidates.len());
                Some(LoadedDocument {
                    filename: doc.filename.clone(),
                    candidates,
                })
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", doc.filename, e);
                None
            }
        }
    }

    fn excerpt<S: SpanSource>(&self, source: &S, section: &SectionCandidate) -> String {
        match source.page_text(section.page_number) {
            Ok(text) => extract_excerpt(&text, &section.section_title, &self.options.excerpt),
            Err(e) => {
                log::warn!(
                    "No text for {} page {}: {}",
                    section.document,
                    section.page_number,
                    e
                );
                String::new()
            }
        }
    }
}

/// Analyze the collection described by a request file, reading PDFs from `pdf_dir`.
pub fn analyze_collection<P, Q>(
    request_path: P,
    pdf_dir: Q,
    options: &RankOptions,
) -> Result<CollectionReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let request = CollectionRequest::from_file(request_path)?;
    let pdf_dir = pdf_dir.as_ref();
    let parse_options = ParseOptions::default().lenient();

    Ok(CollectionAnalyzer::new(options.clone()).analyze(&request, |filename| {
        PdfSpanSource::open_with_options(pdf_dir.join(filename), parse_options.clone())
    }))
}

/// Write a report as JSON indented by four spaces.
pub fn write_report<P: AsRef<Path>>(report: &CollectionReport, path: P) -> Result<()> {
    let json = to_json(report, JsonFormat::Indented(REPORT_INDENT))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Local time in ISO-8601 with microseconds.
pub fn current_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
