//! Prompt composition.
//!
//! Pure string assembly: retrieved chunks become numbered context blocks
//! followed by the question. With no chunks the prompt is a bare
//! instruction plus the question.

use crate::models::DocChunk;

/// System instruction sent with every provider call.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Build the user-side prompt for a question and its retrieved context.
pub fn build_prompt(question: &str, chunks: &[DocChunk]) -> String {
    if chunks.is_empty() {
        return format!("Answer the user's question clearly.\n\nQuestion: {}", question);
    }

    let context_text = chunks
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("[Document {}] {}", i + 1, doc.chunk))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a helpful assistant. Use the following context documents when they are relevant.\n\n\
         {}\n\n\
         Question: {}\n\n\
         Answer based on the context when possible. If the context is not relevant, answer from your own knowledge.",
        context_text, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: i64, text: &str) -> DocChunk {
        DocChunk {
            id,
            title: "policy".to_string(),
            chunk: text.to_string(),
        }
    }

    #[test]
    fn test_no_chunks_bare_question() {
        let prompt = build_prompt("What is the policy on X?", &[]);
        assert!(prompt.contains("What is the policy on X?"));
        assert!(!prompt.contains("Document"));
    }

    #[test]
    fn test_chunks_labeled_in_input_order() {
        let chunks = vec![chunk(1, "first chunk text"), chunk(2, "second chunk text")];
        let prompt = build_prompt("Q", &chunks);

        let doc1 = prompt.find("[Document 1] first chunk text").unwrap();
        let doc2 = prompt.find("[Document 2] second chunk text").unwrap();
        let question = prompt.find("Question: Q").unwrap();
        assert!(doc1 < doc2);
        assert!(doc2 < question);
    }

    #[test]
    fn test_deterministic() {
        let chunks = vec![chunk(1, "alpha"), chunk(2, "beta")];
        assert_eq!(build_prompt("Q", &chunks), build_prompt("Q", &chunks));
    }
}
