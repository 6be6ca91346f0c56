use lopdf::{Document, Object, ObjectId};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};
use crate::page_range::{PageRange, ResolvedRange};

pub struct PdfDocument {
    pub doc: Document,
    pub source_name: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source_name = path.as_ref().display().to_string();
        let doc = Document::load(&path).map_err(|e| Error::load(&source_name, e))?;
        Ok(PdfDocument { doc, source_name })
    }

    /// Parse a PDF from a seekable stream, reading it from the very start
    /// regardless of where a previous reader left it.
    pub fn from_reader<R: Read + Seek>(mut reader: R, source_name: &str) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let doc = Document::load_from(reader).map_err(|e| Error::load(source_name, e))?;
        Ok(PdfDocument {
            doc,
            source_name: source_name.to_string(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Page count and title, enough to pick a range before reading.
    pub fn overview(&self) -> DocumentOverview {
        DocumentOverview {
            source: self.source_name.clone(),
            page_count: self.page_count(),
            title: self.title(),
        }
    }

    /// `/Title` from the trailer's Info dictionary, when present.
    pub fn title(&self) -> Option<String> {
        let info = match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match info.get(b"Title").ok()? {
            Object::String(bytes, _) => Some(text_string(bytes)).filter(|t| !t.trim().is_empty()),
            _ => None,
        }
    }

    /// Serialize a new PDF holding only the pages in `range`, in source order.
    ///
    /// The source document is left untouched; the copy drops every other
    /// page and any object no longer reachable from the kept ones.
    pub fn extract_range(&self, range: &ResolvedRange) -> Result<Vec<u8>> {
        let mut new_doc = self.doc.clone();

        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .into_iter()
            .map(|(num, _)| num)
            .filter(|num| !range.contains_page(*num))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();

        let mut buffer = Vec::new();
        new_doc.save_to(&mut buffer).map_err(|e| Error::Extraction(e.into()))?;
        Ok(buffer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOverview {
    pub source: String,
    pub page_count: u32,
    pub title: Option<String>,
}

impl DocumentOverview {
    /// The widest range extraction accepts; `None` for a document without pages.
    pub fn extract_bounds(&self) -> Option<PageRange> {
        (self.page_count > 0).then(|| PageRange::new(1, i64::from(self.page_count)))
    }
}

// Text strings are UTF-16BE behind a byte order mark, otherwise one byte per char.
fn text_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(b"\xFE\xFF") {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().copied().map(char::from).collect(),
    }
}
