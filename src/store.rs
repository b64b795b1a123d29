//! Conversation and message persistence.
//!
//! Three independent tables back the system; this module owns the two that
//! change at request time. Writes are single-statement inserts with no
//! cross-table transactions. A caller-supplied conversation id is accepted
//! without an existence check, so messages may reference a conversation
//! that was never created here.

use anyhow::Result;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::Message;

/// Returns the supplied conversation id unchanged, or creates a new
/// conversation and returns its assigned id.
pub async fn ensure_conversation(pool: &SqlitePool, id: Option<i64>) -> Result<i64> {
    if let Some(id) = id {
        return Ok(id);
    }

    let now = Utc::now().to_rfc3339();
    let result = sqlx::query("INSERT INTO conversations (created_at) VALUES (?)")
        .bind(&now)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Inserts one message row and returns its assigned id. The role value is
/// stored as given; content has no length limit.
pub async fn append_message(
    pool: &SqlitePool,
    conversation_id: i64,
    role: &str,
    content: &str,
) -> Result<i64> {
    let now = Utc::now().to_rfc3339();
    let result = sqlx::query(
        "INSERT INTO messages (conversation_id, role, content, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(conversation_id)
    .bind(role)
    .bind(content)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Fetches a conversation transcript in insertion order.
pub async fn list_messages(pool: &SqlitePool, conversation_id: i64) -> Result<Vec<Message>> {
    let rows = sqlx::query(
        "SELECT id, conversation_id, role, content, created_at
         FROM messages WHERE conversation_id = ? ORDER BY id ASC",
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    let messages = rows
        .iter()
        .map(|row| Message {
            id: row.get("id"),
            conversation_id: row.get("conversation_id"),
            role: row.get("role"),
            content: row.get("content"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(messages)
}
