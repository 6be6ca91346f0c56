pub fn summarize(text: &str) -> String {
    format!(
        "Write a concise summary of the following text.\n\n\
         \"\"\"\n{text}\n\"\"\"\n\n\
         CONCISE SUMMARY:"
    )
}

pub fn answer(question: &str, context: &str) -> String {
    format!(
        "Answer the question using only the document below. \
         If the document does not contain the answer, say that you don't know.\n\n\
         Document:\n\"\"\"\n{context}\n\"\"\"\n\n\
         Question: {question}\n\
         Answer:"
    )
}

/// Used on one part of a document too long to send whole.
pub fn extract_relevant(question: &str, context: &str) -> String {
    format!(
        "Below is one part of a longer document. Copy out, in short notes, \
         everything in it that helps answer the question. \
         If nothing is relevant, reply with NONE.\n\n\
         Part:\n\"\"\"\n{context}\n\"\"\"\n\n\
         Question: {question}\n\
         Notes:"
    )
}
