use super::{prompt, LanguageModel};
use crate::error::{Error, Result};
use crate::pdf::text::PageDocument;

/// Rounds of condensing before giving up on a document that won't shrink.
const MAX_REDUCE_ROUNDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    Summarize,
    Question(String),
}

impl QueryKind {
    fn final_prompt(&self, text: &str) -> String {
        match self {
            QueryKind::Summarize => prompt::summarize(text),
            QueryKind::Question(question) => prompt::answer(question, text),
        }
    }

    fn partial_prompt(&self, text: &str) -> String {
        match self {
            QueryKind::Summarize => prompt::summarize(text),
            QueryKind::Question(question) => prompt::extract_relevant(question, text),
        }
    }
}

/// Summarize `docs` or answer a question about them.
///
/// Text that fits in `max_context_chars` goes to the model in a single
/// prompt. Longer text is split on page boundaries, each part is condensed
/// on its own, and the condensed parts are combined until they fit.
pub async fn run_query<M: LanguageModel + ?Sized>(
    model: &M,
    docs: &[PageDocument],
    kind: &QueryKind,
    max_context_chars: usize,
) -> Result<String> {
    let texts: Vec<&str> = docs
        .iter()
        .map(|d| d.text.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if texts.is_empty() {
        return Err(Error::EmptySelection);
    }

    let mut chunks = chunk_texts(&texts, max_context_chars);
    tracing::info!(pages = docs.len(), chunks = chunks.len(), ?kind, "running query");

    let mut rounds = 0;
    while chunks.len() > 1 {
        rounds += 1;
        if rounds > MAX_REDUCE_ROUNDS {
            return Err(Error::Model(format!(
                "document still too long after {MAX_REDUCE_ROUNDS} rounds of condensing"
            )));
        }

        let mut partials = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!(round = rounds, part = i + 1, of = chunks.len(), "condensing part");
            let partial = model.complete(&kind.partial_prompt(chunk)).await?;
            if !is_none_reply(&partial) {
                partials.push(partial);
            }
        }

        if partials.is_empty() {
            // no part had anything to say about the question
            partials.push("NONE".to_string());
        }
        let refs: Vec<&str> = partials.iter().map(String::as_str).collect();
        chunks = chunk_texts(&refs, max_context_chars);
    }

    model.complete(&kind.final_prompt(&chunks[0])).await
}

fn is_none_reply(reply: &str) -> bool {
    reply.trim().trim_end_matches('.').eq_ignore_ascii_case("none")
}

/// Group texts into chunks of at most `max_chars` characters, keeping each
/// text whole where possible and splitting oversized ones.
fn chunk_texts(texts: &[&str], max_chars: usize) -> Vec<String> {
    const SEPARATOR: &str = "\n\n";

    let mut chunks = Vec::new();
    let mut current = String::new();

    for piece in texts.iter().flat_map(|t| split_long(t, max_chars)) {
        let needed = if current.is_empty() {
            piece.chars().count()
        } else {
            current.chars().count() + SEPARATOR.len() + piece.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str(SEPARATOR);
        }
        current.push_str(piece);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_long(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut parts = Vec::new();
    let mut rest = text;
    while rest.chars().count() > max_chars {
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        parts.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts
}
