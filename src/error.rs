use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// The source could not be turned into page text.
    #[error("Failed to load {source_name}: {reason}")]
    DocumentLoad { source_name: String, reason: String },

    /// Pages were selected but the new PDF could not be serialized.
    #[error("Failed to write extracted PDF")]
    Extraction(#[source] lopdf::Error),

    #[error("No text found in the selected pages")]
    EmptySelection,

    #[error("Model request failed: {0}")]
    Model(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Error::DocumentLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Start => f.write_str("Start"),
            Bound::End => f.write_str("End"),
        }
    }
}

/// A page bound that cannot be applied to the document at hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRange {
    #[error("Start page must be 1 or greater (got {start})")]
    StartBelowOne { start: i64 },

    #[error("{bound} page {page} is out of valid range (1-{page_count})")]
    OutOfBounds {
        bound: Bound,
        page: i64,
        page_count: u32,
    },

    #[error("Start page {start} cannot be after end page {end}")]
    StartAfterEnd { start: i64, end: i64 },
}
