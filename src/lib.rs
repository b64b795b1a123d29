//! # docchat
//!
//! A document-grounded chat server: questions come in over HTTP, matching
//! snippets are retrieved from a seeded SQLite document store by substring
//! match, a composed prompt goes out to an OpenAI-compatible completion
//! provider, and the exchange is persisted as a conversation.
//!
//! ## Request Flow
//!
//! ```text
//! POST /v1/chat/answer
//!   → ensure conversation
//!   → persist user turn
//!   → substring retrieval (optional)
//!   → build prompt
//!   → completion provider
//!   → persist assistant turn
//!   → answer + citations
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types and wire payloads |
//! | [`db`] | Database connection pool |
//! | [`migrate`] | Schema creation |
//! | [`store`] | Conversation and message persistence |
//! | [`seed`] | One-shot document seeding |
//! | [`retrieve`] | Substring retrieval over stored chunks |
//! | [`prompt`] | Prompt composition |
//! | [`provider`] | Completion provider abstraction |
//! | [`answer`] | The answer pipeline |
//! | [`server`] | HTTP server |

pub mod answer;
pub mod config;
pub mod db;
pub mod migrate;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod retrieve;
pub mod seed;
pub mod server;
pub mod store;
