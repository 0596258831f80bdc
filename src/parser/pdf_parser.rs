//! PDF span source using lopdf.

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::Page;

use super::backend::SpanSource;
use super::layout::LayoutExtractor;
use super::options::{ErrorMode, ParseOptions};

/// Letter height, used when a page has no usable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// [`SpanSource`] backed by a `lopdf::Document`.
pub struct PdfSpanSource {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfSpanSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load(path.as_ref()).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc, options))
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc, options))
    }

    fn from_document(doc: LopdfDocument, options: ParseOptions) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        Self { doc, options }
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Parse a single page into lines.
    fn parse_page(&self, page_num: u32, page_id: lopdf::ObjectId) -> Result<Page> {
        let height = self.page_height(page_id);
        let extractor = LayoutExtractor::new(&self.doc)
            .with_unicode_normalization(self.options.normalize_unicode);

        match extractor.extract_page_lines(page_id, height) {
            Ok(lines) => Ok(Page::with_lines(page_num, lines)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract spans from page {}: {}", page_num, e);
                Ok(Page::new(page_num))
            }
            Err(e) => Err(e),
        }
    }

    /// Page height from the MediaBox of the page or its parent.
    fn page_height(&self, page_id: lopdf::ObjectId) -> f32 {
        let mut current = self.doc.get_dictionary(page_id).ok();

        while let Some(dict) = current {
            if let Some(height) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| self.resolve(obj).as_array().ok())
                .and_then(|arr| media_box_height(arr))
            {
                return height;
            }

            current = dict
                .get(b"Parent")
                .ok()
                .and_then(|p| p.as_reference().ok())
                .and_then(|r| self.doc.get_dictionary(r).ok());
        }

        DEFAULT_PAGE_HEIGHT
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }
}

impl SpanSource for PdfSpanSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn pages(&self) -> Result<Vec<Page>> {
        self.doc
            .get_pages()
            .into_iter()
            .map(|(page_num, page_id)| self.parse_page(page_num, page_id))
            .collect()
    }

    fn page_text(&self, page_num: u32) -> Result<String> {
        let count = self.page_count();
        if page_num == 0 || page_num > count {
            return Err(Error::PageOutOfRange(page_num, count));
        }
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::PdfParse(format!("Page {}: {}", page_num, e)))
    }
}

fn media_box_height(arr: &[Object]) -> Option<f32> {
    if arr.len() < 4 {
        return None;
    }
    let y0 = number(&arr[1])?;
    let y1 = number(&arr[3])?;
    let height = (y1 - y0).abs();
    (height > 0.0).then_some(height)
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
