use crate::page_range::LAST_PAGE;
use crate::pdf::{DocumentOverview, PdfDocument};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)
        .with_context(|| format!("failed to open {}", path.as_ref().display()))?;
    print!("{}", render_overview(&doc.overview()));
    Ok(())
}

/// Page count plus the `--start`/`--end` values each command accepts for it.
pub fn render_overview(overview: &DocumentOverview) -> String {
    let mut out = format!("File: {}\n", overview.source);
    if let Some(title) = &overview.title {
        out.push_str(&format!("Title: {}\n", title));
    }
    out.push_str(&format!("Pages: {}\n", overview.page_count));
    out.push_str(&format!(
        "Read/summarize/query: --start 1 --end {} (whole document)\n",
        LAST_PAGE
    ));
    match overview.extract_bounds() {
        Some(range) => out.push_str(&format!(
            "Extract: --start {} --end {} (pages must lie within)\n",
            range.start, range.end
        )),
        None => out.push_str("Extract: no pages to extract\n"),
    }
    out
}
