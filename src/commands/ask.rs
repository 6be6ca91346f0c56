use crate::config::ModelConfig;
use crate::llm::{run_query, OpenAiClient, QueryKind};
use crate::page_range::PageRange;
use crate::pdf::text::load_document;
use anyhow::Result;
use std::path::Path;
use std::time::Instant;

pub async fn run<P: AsRef<Path>>(
    path: P,
    range: PageRange,
    kind: QueryKind,
    config: ModelConfig,
) -> Result<()> {
    let started = Instant::now();

    let docs = load_document(&path, range)?;
    let max_context_chars = config.max_context_chars;
    let model = OpenAiClient::new(config);

    let result = run_query(&model, &docs, &kind, max_context_chars).await?;

    println!("{}", result);
    println!();
    println!(
        "Time taken: {:.2} seconds ({} page(s))",
        started.elapsed().as_secs_f64(),
        docs.len()
    );

    Ok(())
}
