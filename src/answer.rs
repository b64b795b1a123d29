//! Answer pipeline.
//!
//! The single control path behind `POST /v1/chat/answer` and the `ask`
//! CLI command: ensure conversation → persist user turn → retrieve →
//! build prompt → call provider → persist assistant turn → respond with
//! answer and citations.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::models::{ChatRequest, ChatResponse, Citation, DocChunk};
use crate::prompt;
use crate::provider::ChatProvider;
use crate::retrieve;
use crate::store;

/// Maximum snippet length in a citation before truncation.
const SNIPPET_MAX_CHARS: usize = 200;

/// Truncate a chunk preview to [`SNIPPET_MAX_CHARS`] characters plus an
/// ellipsis marker. Text at or under the limit passes through unchanged.
pub fn truncate_snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    format!("{}...", truncated)
}

fn make_citations(chunks: &[DocChunk]) -> Vec<Citation> {
    chunks
        .iter()
        .map(|doc| Citation {
            doc_id: doc.id,
            title: doc.title.clone(),
            snippet: truncate_snippet(&doc.chunk),
        })
        .collect()
}

/// Run the full pipeline for one question. The returned `message_id` is
/// that of the assistant turn.
pub async fn answer_question(
    pool: &SqlitePool,
    provider: &dyn ChatProvider,
    config: &Config,
    request: &ChatRequest,
) -> Result<ChatResponse> {
    let conversation_id = store::ensure_conversation(pool, request.conversation_id).await?;

    store::append_message(pool, conversation_id, "user", &request.question).await?;

    let retrieved = if request.use_retrieval {
        let top_k = retrieve::clamp_top_k(
            request.top_k.unwrap_or(config.retrieval.default_top_k),
            config.retrieval.max_top_k,
        );
        retrieve::search(pool, &request.question, top_k).await?
    } else {
        Vec::new()
    };

    let user_prompt = prompt::build_prompt(&request.question, &retrieved);

    let answer = provider
        .complete(prompt::SYSTEM_INSTRUCTION, &user_prompt)
        .await?;

    let message_id = store::append_message(pool, conversation_id, "assistant", &answer).await?;

    Ok(ChatResponse {
        conversation_id,
        message_id,
        answer,
        citations: make_citations(&retrieved),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_under_limit_unchanged() {
        let text = "short snippet";
        assert_eq!(truncate_snippet(text), text);
    }

    #[test]
    fn test_snippet_exactly_at_limit_unchanged() {
        let text = "a".repeat(200);
        assert_eq!(truncate_snippet(&text), text);
    }

    #[test]
    fn test_snippet_over_limit_truncated_with_marker() {
        let text = "b".repeat(201);
        let snippet = truncate_snippet(&text);
        assert_eq!(snippet.len(), 203);
        assert!(snippet.ends_with("..."));
        assert_eq!(&snippet[..200], &text[..200]);
    }

    #[test]
    fn test_citations_carry_doc_identity() {
        let chunks = vec![DocChunk {
            id: 7,
            title: "policy".to_string(),
            chunk: "c".repeat(250),
        }];
        let citations = make_citations(&chunks);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].doc_id, 7);
        assert_eq!(citations[0].title, "policy");
        assert!(citations[0].snippet.ends_with("..."));
    }
}
