//! Core data types shared by the store, retriever, and answer pipeline.

use serde::{Deserialize, Serialize};

/// One stored message in a conversation. Immutable once written.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: String, // RFC 3339 UTC
}

/// A fixed-size window of the seeded source document.
#[derive(Debug, Clone)]
pub struct DocChunk {
    pub id: i64,
    pub title: String,
    pub chunk: String,
}

/// Request body for `POST /v1/chat/answer` and the `ask` CLI command.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub conversation_id: Option<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    pub user_id: Option<String>,
    pub question: String,
    #[serde(default = "default_use_retrieval")]
    pub use_retrieval: bool,
    #[serde(default)]
    pub top_k: Option<i64>,
}

fn default_use_retrieval() -> bool {
    true
}

/// Response payload for an answered question.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub conversation_id: i64,
    pub message_id: i64,
    pub answer: String,
    pub citations: Vec<Citation>,
}

/// Identifies a stored chunk that informed an answer, with a truncated
/// preview of its text.
#[derive(Debug, Clone, Serialize)]
pub struct Citation {
    pub doc_id: i64,
    pub title: String,
    pub snippet: String,
}
