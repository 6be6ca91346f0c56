use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::page_range::{PageRange, LAST_PAGE};

#[derive(Parser)]
#[command(name = "docllm")]
#[command(about = "Summarize, question and slice PDF documents with a language model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Show the page count, title and valid page ranges
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Print the text of a page range
    ReadPages {
        /// PDF or text file to read
        path: PathBuf,

        #[command(flatten)]
        range: QueryRangeArgs,
    },

    /// Extract a page range to a new PDF named extracted_{start}-{end}_{name}
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// First page to keep (1-based)
        #[arg(short, long, allow_negative_numbers = true)]
        start: i64,

        /// Last page to keep (1-based, inclusive)
        #[arg(short, long, allow_negative_numbers = true)]
        end: i64,

        /// Directory to write the new PDF into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Summarize a document
    Summarize {
        /// PDF or text file
        path: PathBuf,

        #[command(flatten)]
        range: QueryRangeArgs,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Ask a question about a document
    Query {
        /// PDF or text file
        path: PathBuf,

        /// The question to answer
        question: String,

        #[command(flatten)]
        range: QueryRangeArgs,

        #[command(flatten)]
        model: ModelArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct QueryRangeArgs {
    /// First page (1-based)
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub start: i64,

    /// Last page (1-based, inclusive); -1 is the last page, -N leaves off the last N
    #[arg(short, long, default_value_t = LAST_PAGE, allow_negative_numbers = true)]
    pub end: i64,
}

impl From<QueryRangeArgs> for PageRange {
    fn from(args: QueryRangeArgs) -> Self {
        PageRange::new(args.start, args.end)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Model name (overrides MODEL_NAME)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 1.0
    #[arg(short, long)]
    pub temperature: Option<f32>,
}
