use anyhow::{Context, Result};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::page_range::{PageRange, LAST_PAGE};
use crate::pdf::extract::{extract_pages_as_pdf, PDF_MIME_TYPE};
use crate::pdf::text::load_document;
use crate::pdf::PdfDocument;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfReadPagesRequest {
    #[schemars(description = "Path to the PDF or text file")]
    pub path: String,
    #[schemars(description = "First page, 1-based (default: 1)")]
    #[serde(default = "default_start_page")]
    pub start_page: i64,
    #[schemars(
        description = "Last page, 1-based and inclusive. -1 is the last page; -N leaves off the last N pages (default: -1)"
    )]
    #[serde(default = "default_end_page")]
    pub end_page: i64,
}

fn default_start_page() -> i64 {
    1
}

fn default_end_page() -> i64 {
    LAST_PAGE
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "First page to keep, 1-based")]
    pub start_page: i64,
    #[schemars(description = "Last page to keep, 1-based and inclusive")]
    pub end_page: i64,
    #[schemars(description = "Directory for the new file (default: the source file's directory)")]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the page count and title of a PDF, plus the first and last page pdf_extract will accept")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let overview = doc.overview();
                let bounds = overview.extract_bounds();
                let result = PdfInfoResult {
                    path,
                    page_count: overview.page_count,
                    title: overview.title,
                    extract_start_page: bounds.map(|r| r.start),
                    extract_end_page: bounds.map(|r| r.end),
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Extract the text of a page range from a PDF (or a whole text file). A start page past the end of the document returns no pages.")]
    fn pdf_read_pages(&self, Parameters(req): Parameters<PdfReadPagesRequest>) -> String {
        let range = PageRange::new(req.start_page, req.end_page);
        match load_document(&req.path, range) {
            Ok(docs) => {
                let result: Vec<PageTextResult> = docs
                    .into_iter()
                    .map(|d| PageTextResult {
                        source: d.source,
                        page: d.page,
                        text: d.text,
                    })
                    .collect();
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Copy a page range of a PDF into a new file named extracted_{start}-{end}_{name}")]
    fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        match extract_to_dir(&req) {
            Ok(result) => {
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

fn extract_to_dir(req: &PdfExtractRequest) -> Result<ExtractResult> {
    let path = Path::new(&req.path);
    let original_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.pdf");
    let output_dir = match &req.output_dir {
        Some(dir) => Path::new(dir).to_path_buf(),
        None => path.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let extracted = extract_pages_as_pdf(
        file,
        original_name,
        PageRange::new(req.start_page, req.end_page),
    )?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let output = extracted
        .save_to_dir(&output_dir)
        .with_context(|| format!("failed to write into {}", output_dir.display()))?;

    Ok(ExtractResult {
        output_path: output.display().to_string(),
        file_name: extracted.file_name,
        mime_type: PDF_MIME_TYPE.to_string(),
        page_count: extracted.page_count,
    })
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    /// Absent when the document has no pages.
    pub extract_start_page: Option<i64>,
    pub extract_end_page: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageTextResult {
    pub source: String,
    pub page: u32,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExtractResult {
    pub output_path: String,
    pub file_name: String,
    pub mime_type: String,
    pub page_count: u32,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF reading tools. Use pdf_info to get the page count, pdf_read_pages to load \
                 the text of a page range for summarizing or answering questions, and \
                 pdf_extract to save a page range as a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();
    tracing::info!("starting MCP server on stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::numbered_pdf;

    fn write_pdf(dir: &Path, pages: u32) -> String {
        let path = dir.join("paper.pdf");
        std::fs::write(&path, numbered_pdf(pages)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_pdf_info_tool() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), 4);
        let out = PdfServer::new().pdf_info(Parameters(PathRequest { path }));
        let result: PdfInfoResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.page_count, 4);
        assert_eq!(result.extract_start_page, Some(1));
        assert_eq!(result.extract_end_page, Some(4));
    }

    #[test]
    fn test_pdf_read_pages_tags_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), 5);
        let out = PdfServer::new().pdf_read_pages(Parameters(PdfReadPagesRequest {
            path: path.clone(),
            start_page: 2,
            end_page: -2,
        }));
        let result: Vec<PageTextResult> = serde_json::from_str(&out).unwrap();
        let pages: Vec<u32> = result.iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![2, 3]);
        assert!(result.iter().all(|r| r.source == path));
    }

    #[test]
    fn test_pdf_read_pages_defaults() {
        let req: PdfReadPagesRequest = serde_json::from_str(r#"{"path": "a.pdf"}"#).unwrap();
        assert_eq!(req.start_page, 1);
        assert_eq!(req.end_page, -1);
    }

    #[test]
    fn test_pdf_read_pages_past_end_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), 3);
        let out = PdfServer::new().pdf_read_pages(Parameters(PdfReadPagesRequest {
            path,
            start_page: 9,
            end_page: -1,
        }));
        let result: Vec<PageTextResult> = serde_json::from_str(&out).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_pdf_extract_tool() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), 10);
        let out = PdfServer::new().pdf_extract(Parameters(PdfExtractRequest {
            path,
            start_page: 3,
            end_page: 5,
            output_dir: None,
        }));
        let result: ExtractResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.file_name, "extracted_3-5_paper.pdf");
        assert_eq!(result.page_count, 3);
        assert_eq!(result.mime_type, "application/pdf");
        assert!(dir.path().join("extracted_3-5_paper.pdf").exists());
    }

    #[test]
    fn test_pdf_extract_reports_invalid_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), 10);
        let out = PdfServer::new().pdf_extract(Parameters(PdfExtractRequest {
            path,
            start_page: 12,
            end_page: 12,
            output_dir: None,
        }));
        assert!(out.starts_with("Error:"));
        assert!(out.contains("1-10"));
    }

    #[test]
    fn test_pdf_extract_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), 4);
        let output_dir = dir.path().join("out").join("slices");
        let out = PdfServer::new().pdf_extract(Parameters(PdfExtractRequest {
            path,
            start_page: 2,
            end_page: 3,
            output_dir: Some(output_dir.display().to_string()),
        }));
        let result: ExtractResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.page_count, 2);
        assert!(output_dir.join("extracted_2-3_paper.pdf").exists());
    }

    #[test]
    fn test_pdf_extract_missing_source_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.pdf").display().to_string();
        let out = PdfServer::new().pdf_extract(Parameters(PdfExtractRequest {
            path: missing.clone(),
            start_page: 1,
            end_page: 1,
            output_dir: None,
        }));
        assert!(out.starts_with("Error: failed to open"));
        assert!(out.contains(&missing));
    }
}
