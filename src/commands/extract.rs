use crate::page_range::PageRange;
use crate::pdf::extract::extract_pages_as_pdf;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, range: PageRange, output_dir: Q) -> Result<()> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let original_name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.pdf");

    let file =
        File::open(input).with_context(|| format!("Failed to open PDF: {}", input.display()))?;
    let extracted = extract_pages_as_pdf(file, original_name, range)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;
    let output = extracted
        .save_to_dir(output_dir)
        .with_context(|| format!("Failed to save {}", extracted.file_name))?;

    println!(
        "Extracted {} page(s) to {} ({}, {} bytes)",
        extracted.page_count,
        output.display(),
        extracted.mime_type(),
        extracted.bytes.len()
    );

    Ok(())
}
