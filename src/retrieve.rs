//! Substring retrieval over the docs table.
//!
//! No ranking or scoring: matching rows come back in storage (id) order.
//! The query is wrapped with `%` wildcards on both sides and matched
//! case-sensitively against chunk text and title (`case_sensitive_like`
//! is enabled on every connection).

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::models::DocChunk;

/// Clamp a requested `top_k` to `[0, max_top_k]`. Negative values become 0
/// rather than reaching the query as an invalid LIMIT.
pub fn clamp_top_k(top_k: i64, max_top_k: i64) -> i64 {
    top_k.clamp(0, max_top_k)
}

/// Returns up to `top_k` chunks whose text or title contains `query` as a
/// substring. `top_k` must already be clamped; zero short-circuits to an
/// empty result.
pub async fn search(pool: &SqlitePool, query: &str, top_k: i64) -> Result<Vec<DocChunk>> {
    if top_k <= 0 {
        return Ok(Vec::new());
    }

    let pattern = format!("%{}%", query);
    let rows = sqlx::query(
        r#"
        SELECT id, title, chunk
        FROM docs
        WHERE chunk LIKE ? OR title LIKE ?
        ORDER BY id ASC
        LIMIT ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(top_k)
    .fetch_all(pool)
    .await?;

    let chunks = rows
        .iter()
        .map(|row| DocChunk {
            id: row.get("id"),
            title: row.get("title"),
            chunk: row.get("chunk"),
        })
        .collect();

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::migrate;

    async fn pool_with_docs(chunks: &[&str]) -> SqlitePool {
        let pool = db::connect_in_memory().await.unwrap();
        migrate::run_migrations(&pool).await.unwrap();
        for chunk in chunks {
            sqlx::query("INSERT INTO docs (title, chunk, created_at) VALUES (?, ?, ?)")
                .bind("policy")
                .bind(chunk)
                .bind("2026-01-01T00:00:00Z")
                .execute(&pool)
                .await
                .unwrap();
        }
        pool
    }

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(-5, 25), 0);
        assert_eq!(clamp_top_k(0, 25), 0);
        assert_eq!(clamp_top_k(3, 25), 3);
        assert_eq!(clamp_top_k(100, 25), 25);
    }

    #[tokio::test]
    async fn test_top_k_limits_matches() {
        let pool = pool_with_docs(&[
            "refund window one",
            "refund window two",
            "refund window three",
            "refund window four",
            "refund window five",
        ])
        .await;

        let results = search(&pool, "refund", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        // Storage order, not relevance order.
        assert!(results[0].id < results[1].id);
    }

    #[tokio::test]
    async fn test_no_matches_returns_empty() {
        let pool = pool_with_docs(&["vacation policy", "expense policy"]).await;
        let results = search(&pool, "quantum", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_title_matches_too() {
        let pool = pool_with_docs(&["nothing relevant here"]).await;
        let results = search(&pool, "policy", 5).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_match_is_case_sensitive() {
        let pool = pool_with_docs(&["Remote Work guidelines"]).await;

        let exact = search(&pool, "Remote Work", 5).await.unwrap();
        assert_eq!(exact.len(), 1);

        let wrong_case = search(&pool, "remote work", 5).await.unwrap();
        assert!(wrong_case.is_empty());
    }

    #[tokio::test]
    async fn test_zero_top_k_short_circuits() {
        let pool = pool_with_docs(&["refund policy"]).await;
        let results = search(&pool, "refund", 0).await.unwrap();
        assert!(results.is_empty());
    }
}
