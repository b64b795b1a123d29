//! Document seeding.
//!
//! Splits a source text file into fixed-size non-overlapping character
//! windows and stores each non-blank window as one row in the docs table.
//! Runs at most once per fresh database: a non-empty docs table or a
//! missing source file skips seeding silently. There is no re-seeding or
//! versioning path if the source text changes.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::config::Config;

/// Split text into fixed-size character windows, dropping windows that are
/// whitespace-only. Windows are non-overlapping; the final window may be
/// shorter than `chunk_chars`.
pub fn split_windows(text: &str, chunk_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_chars)
        .map(|window| window.iter().collect::<String>())
        .filter(|window| !window.trim().is_empty())
        .collect()
}

/// Seed the docs table from the configured source file, if the table is
/// empty and the file exists. Returns the number of chunks written.
pub async fn seed_documents(pool: &SqlitePool, config: &Config) -> Result<u64> {
    if !config.seed.path.exists() {
        return Ok(0);
    }

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM docs")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let text = std::fs::read_to_string(&config.seed.path)
        .with_context(|| format!("Failed to read seed file: {}", config.seed.path.display()))?;

    let windows = split_windows(&text, config.seed.chunk_chars);
    let now = Utc::now().to_rfc3339();
    let mut written = 0u64;

    for window in &windows {
        sqlx::query("INSERT INTO docs (title, chunk, created_at) VALUES (?, ?, ?)")
            .bind(&config.seed.title)
            .bind(window)
            .bind(&now)
            .execute(pool)
            .await?;
        written += 1;
    }

    Ok(written)
}
