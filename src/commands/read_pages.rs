use crate::page_range::PageRange;
use crate::pdf::text::{load_document, PageDocument};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, range: PageRange) -> Result<()> {
    let docs = load_document(&path, range)?;

    if docs.is_empty() {
        println!("No pages in the selected range.");
        return Ok(());
    }

    for doc in &docs {
        println!("{}", render_page(doc));
    }

    Ok(())
}

fn render_page(doc: &PageDocument) -> String {
    format!("--- {} page {} ---\n{}\n", doc.source, doc.page, doc.text.trim_end())
}
