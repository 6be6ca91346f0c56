use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{Error, Result};
use crate::page_range::{PageRange, ResolveMode};

/// Text of one page, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// 1-based position in the source document.
    pub page: u32,
    pub text: String,
    pub source: String,
}

/// Load a PDF or plain-text file for prompting.
///
/// PDFs are narrowed to `range`; text files have no pages and always load
/// whole.
pub fn load_document<P: AsRef<Path>>(path: P, range: PageRange) -> Result<Vec<PageDocument>> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("pdf") => load_pdf(path, range),
        Some("txt") | Some("md") => load_text(path),
        _ => Err(Error::load(
            path.display().to_string(),
            "unsupported file type (expected .pdf, .txt or .md)",
        )),
    }
}

pub fn load_pdf<P: AsRef<Path>>(path: P, range: PageRange) -> Result<Vec<PageDocument>> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| Error::load(&source, e))?;
    load_pdf_bytes(&bytes, &source, range)
}

/// Split an in-memory PDF into page documents and keep those in `range`.
///
/// A range that starts past the last page yields no documents rather than
/// an error.
pub fn load_pdf_bytes(bytes: &[u8], source: &str, range: PageRange) -> Result<Vec<PageDocument>> {
    tracing::info!(
        source,
        start_page = range.start,
        end_page = range.end,
        "loading PDF"
    );

    let pages = extract_pages(bytes, source)?;
    let resolved = range.resolve(pages.len() as u32, ResolveMode::Query)?;

    if resolved.is_empty() {
        tracing::warn!(
            source,
            page_count = pages.len(),
            start_page = range.start,
            end_page = range.end,
            "page range selects no pages"
        );
    }

    let indices = resolved.indices();
    Ok(pages
        .into_iter()
        .enumerate()
        .skip(indices.start)
        .take(indices.len())
        .map(|(idx, text)| PageDocument {
            page: idx as u32 + 1,
            text,
            source: source.to_string(),
        })
        .collect())
}

pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Vec<PageDocument>> {
    let path = path.as_ref();
    let source = path.display().to_string();
    tracing::info!(source = %source, "loading text file");

    let text = std::fs::read_to_string(path).map_err(|e| Error::load(&source, e))?;
    Ok(vec![PageDocument {
        page: 1,
        text,
        source,
    }])
}

/// Per-page text from `pdf_extract`, which panics on some malformed input.
fn extract_pages(bytes: &[u8], source: &str) -> Result<Vec<String>> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(Error::load(source, e)),
        Err(_) => Err(Error::load(source, "PDF parser panicked (malformed document)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidRange;
    use crate::test_support::numbered_pdf;
    use std::io::Write;

    fn pages(docs: &[PageDocument]) -> Vec<u32> {
        docs.iter().map(|d| d.page).collect()
    }

    #[test]
    fn test_load_all_pages() {
        let docs = load_pdf_bytes(&numbered_pdf(10), "ten.pdf", PageRange::new(1, -1)).unwrap();
        assert_eq!(pages(&docs), (1..=10).collect::<Vec<_>>());
        assert!(docs[0].text.contains("Page 1"));
        assert!(docs[9].text.contains("Page 10"));
        assert!(docs.iter().all(|d| d.source == "ten.pdf"));
    }

    #[test]
    fn test_load_inclusive_end() {
        let docs = load_pdf_bytes(&numbered_pdf(10), "ten.pdf", PageRange::new(3, 5)).unwrap();
        assert_eq!(pages(&docs), vec![3, 4, 5]);
        assert!(docs[0].text.contains("Page 3"));
    }

    #[test]
    fn test_load_start_past_end_is_empty() {
        let docs = load_pdf_bytes(&numbered_pdf(10), "ten.pdf", PageRange::new(12, -1)).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_load_start_below_one_fails() {
        let err = load_pdf_bytes(&numbered_pdf(3), "three.pdf", PageRange::new(0, -1)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRange(InvalidRange::StartBelowOne { start: 0 })
        ));
    }

    #[test]
    fn test_load_corrupt_pdf() {
        let err = load_pdf_bytes(b"%PDF-1.4 garbage", "bad.pdf", PageRange::all()).unwrap_err();
        assert!(matches!(err, Error::DocumentLoad { .. }));
    }

    #[test]
    fn test_load_document_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let pdf_path = dir.path().join("report.PDF");
        std::fs::write(&pdf_path, numbered_pdf(4)).unwrap();
        let docs = load_document(&pdf_path, PageRange::new(2, -2)).unwrap();
        assert_eq!(pages(&docs), vec![2]);

        let txt_path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&txt_path).unwrap();
        writeln!(file, "plain notes").unwrap();
        let docs = load_document(&txt_path, PageRange::new(5, 6)).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text.trim(), "plain notes");

        let other = dir.path().join("image.png");
        std::fs::write(&other, b"png").unwrap();
        assert!(matches!(
            load_document(&other, PageRange::all()),
            Err(Error::DocumentLoad { .. })
        ));
    }

    #[test]
    fn test_load_text_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        assert!(matches!(load_text(&path), Err(Error::DocumentLoad { .. })));
    }
}
