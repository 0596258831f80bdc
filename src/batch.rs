//! Batch outline extraction over a directory of PDFs.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{OutlineExtractor, OutlineOptions};
use crate::error::{Error, Result};
use crate::model::DocumentOutline;
use crate::parser::{ParseOptions, PdfSpanSource};
use crate::render::{to_json, JsonFormat};

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Outline extraction options
    pub outline: OutlineOptions,

    /// PDF reading options
    pub parse: ParseOptions,

    /// Process files in parallel
    pub parallel: bool,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set outline options.
    pub fn with_outline_options(mut self, outline: OutlineOptions) -> Self {
        self.outline = outline;
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Process one file at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            outline: OutlineOptions::default(),
            parse: ParseOptions::default().lenient(),
            parallel: true,
        }
    }
}

/// Result for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Input PDF
    pub input: PathBuf,

    /// JSON file written
    pub output: PathBuf,

    /// The outline written
    pub outline: DocumentOutline,

    /// Why the document could not be read, if it could not
    pub error: Option<String>,
}

/// Results of a batch run, ordered by input file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub items: Vec<BatchItem>,
}

impl BatchSummary {
    /// Number of files written.
    pub fn processed(&self) -> usize {
        self.items.len()
    }

    /// Items whose document could not be read.
    pub fn failed(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| item.error.is_some())
    }
}

/// PDF files directly inside `dir`, sorted by file name.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract the outline of one PDF file.
pub fn outline_file<P: AsRef<Path>>(path: P, options: &BatchOptions) -> Result<DocumentOutline> {
    let source = PdfSpanSource::open_with_options(path, options.parse.clone())?;
    OutlineExtractor::new(options.outline.clone()).try_extract(&source)
}

/// Process one PDF, writing `<stem>.json` into `output_dir`.
///
/// A document that cannot be read is written as the empty outline; only
/// failing to write the JSON is an error.
pub fn process_file(input: &Path, output_dir: &Path, options: &BatchOptions) -> Result<BatchItem> {
    let (outline, error) = match outline_file(input, options) {
        Ok(outline) => (outline, None),
        Err(e) => {
            log::warn!("Failed to read {}: {}", input.display(), e);
            (DocumentOutline::empty(), Some(e.to_string()))
        }
    };

    let stem = input
        .file_stem()
        .ok_or_else(|| Error::Other(format!("{} has no file name", input.display())))?
        .to_string_lossy();
    let output = output_dir.join(format!("{}.json", stem));
    fs::write(&output, to_json(&outline, JsonFormat::Pretty)?)?;
    log::info!("Processed {} -> {}", input.display(), output.display());

    Ok(BatchItem {
        input: input.to_path_buf(),
        output,
        outline,
        error,
    })
}

/// Process every PDF in `input_dir`.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    process_directory_with_progress(input_dir, output_dir, options, |_| {})
}

/// Process every PDF in `input_dir`, calling `on_item` after each file.
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_item: F,
) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&BatchItem) + Sync,
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let files = list_pdfs(input_dir)?;
    let run = |path: &PathBuf| -> Result<BatchItem> {
        let item = process_file(path, output_dir, options)?;
        on_item(&item);
        Ok(item)
    };

    let items: Result<Vec<BatchItem>> = if options.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    Ok(BatchSummary { items: items? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_pdfs_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let names: Vec<_> = list_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_unreadable_pdf_writes_empty_outline() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let pdf = input.path().join("broken.pdf");
        fs::write(&pdf, b"not a pdf").unwrap();

        let item = process_file(&pdf, output.path(), &BatchOptions::default()).unwrap();
        assert!(item.error.is_some());
        assert_eq!(item.output, output.path().join("broken.json"));

        let json = fs::read_to_string(&item.output).unwrap();
        assert_eq!(json, "{\n  \"title\": \"\",\n  \"outline\": []\n}");
    }

    #[test]
    fn test_input_without_file_name_is_an_error() {
        let output = TempDir::new().unwrap();
        let result = process_file(Path::new("/"), output.path(), &BatchOptions::default());
        assert!(matches!(result, Err(Error::Other(_))));
    }

    #[test]
    fn test_options_builder() {
        let options = BatchOptions::new().sequential();
        assert!(!options.parallel);
        assert_eq!(options.parse.error_mode, crate::parser::ErrorMode::Lenient);
    }
}
