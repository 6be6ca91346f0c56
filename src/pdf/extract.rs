use std::io::{Read, Seek};
use std::path::Path;

use crate::error::Result;
use crate::page_range::{PageRange, ResolveMode};
use crate::pdf::PdfDocument;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A standalone PDF built from a page range, ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: u32,
}

impl ExtractedPdf {
    pub fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }

    /// Write into `dir` under [`Self::file_name`], returning the full path.
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// `extracted_{start}-{end}_{original}`, the name offered for download.
pub fn extracted_file_name(range: PageRange, original_name: &str) -> String {
    format!("extracted_{}-{}_{}", range.start, range.end, original_name)
}

/// Copy pages `range.start..=range.end` (1-based) of `reader` into a new PDF.
///
/// Both bounds must name existing pages and start may not follow end; an
/// invalid range fails before any page is copied. `reader` is rewound first,
/// so the same upload can be passed in repeatedly.
pub fn extract_pages_as_pdf<R: Read + Seek>(
    reader: R,
    original_name: &str,
    range: PageRange,
) -> Result<ExtractedPdf> {
    let doc = PdfDocument::from_reader(reader, original_name)?;
    extract_from_document(&doc, original_name, range)
}

pub fn extract_from_document(
    doc: &PdfDocument,
    original_name: &str,
    range: PageRange,
) -> Result<ExtractedPdf> {
    let resolved = range.resolve(doc.page_count(), ResolveMode::Extract)?;
    let bytes = doc.extract_range(&resolved)?;

    tracing::info!(
        source = %doc.source_name,
        first_page = resolved.first_page(),
        last_page = resolved.last_page(),
        size = bytes.len(),
        "extracted pages"
    );

    Ok(ExtractedPdf {
        file_name: extracted_file_name(range, original_name),
        bytes,
        page_count: resolved.len() as u32,
    })
}
