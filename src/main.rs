//! # docchat CLI
//!
//! The `docchat` binary runs the HTTP server and provides maintenance
//! commands for the underlying database.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docchat init` | Create the SQLite database and tables |
//! | `docchat seed` | Seed document chunks from the configured source file |
//! | `docchat ask "<question>"` | Answer one question from the terminal |
//! | `docchat log <conversation_id>` | Print a conversation transcript |
//! | `docchat serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! docchat init --config ./config/docchat.toml
//! docchat seed --config ./config/docchat.toml
//! docchat ask "What is the refund policy?" --config ./config/docchat.toml
//! docchat serve --config ./config/docchat.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docchat::answer;
use docchat::config;
use docchat::db;
use docchat::migrate;
use docchat::models::ChatRequest;
use docchat::provider::OpenAiProvider;
use docchat::seed;
use docchat::server;
use docchat::store;

/// docchat — a document-grounded chat server with substring retrieval
/// over SQLite.
#[derive(Parser)]
#[command(
    name = "docchat",
    about = "A document-grounded chat server with substring retrieval over SQLite",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/docchat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the conversations, messages,
    /// and docs tables. Idempotent.
    Init,

    /// Seed document chunks from the configured source file.
    ///
    /// Splits the source text into fixed-size windows and stores them.
    /// Skips silently if the docs table is already populated or the file
    /// is missing.
    Seed,

    /// Answer one question from the terminal.
    ///
    /// Runs the same pipeline as `POST /v1/chat/answer`: the question and
    /// the answer are persisted, and citations are printed alongside the
    /// answer. Requires the provider API key in the environment.
    Ask {
        /// The question to answer.
        question: String,

        /// Attach the exchange to an existing conversation.
        #[arg(long)]
        conversation: Option<i64>,

        /// Skip retrieval and answer from the model alone.
        #[arg(long)]
        no_retrieval: bool,

        /// Maximum number of chunks to retrieve.
        #[arg(long)]
        top_k: Option<i64>,
    },

    /// Print a conversation transcript.
    Log {
        /// Conversation id.
        conversation_id: i64,
    },

    /// Start the HTTP server.
    ///
    /// Runs migrations and seeding, then binds to `[server].bind` and
    /// serves `GET /` and `POST /v1/chat/answer`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg).await?;
            migrate::run_migrations(&pool).await?;
            pool.close().await;
            println!("Database initialized successfully.");
        }
        Commands::Seed => {
            let pool = db::connect(&cfg).await?;
            migrate::run_migrations(&pool).await?;
            let seeded = seed::seed_documents(&pool, &cfg).await?;
            pool.close().await;
            if seeded > 0 {
                println!("Seeded {} document chunks.", seeded);
            } else {
                println!("Nothing to seed (table populated or source file missing).");
            }
        }
        Commands::Ask {
            question,
            conversation,
            no_retrieval,
            top_k,
        } => {
            let pool = db::connect(&cfg).await?;
            migrate::run_migrations(&pool).await?;
            seed::seed_documents(&pool, &cfg).await?;

            let provider = OpenAiProvider::new(&cfg.provider)?;
            let request = ChatRequest {
                conversation_id: conversation,
                user_id: None,
                question,
                use_retrieval: !no_retrieval,
                top_k,
            };

            let response = answer::answer_question(&pool, &provider, &cfg, &request).await?;
            pool.close().await;

            println!("{}", response.answer);
            if !response.citations.is_empty() {
                println!();
                for citation in &response.citations {
                    println!(
                        "[doc {}] {}: \"{}\"",
                        citation.doc_id,
                        citation.title,
                        citation.snippet.replace('\n', " ")
                    );
                }
            }
            println!();
            println!("conversation: {}", response.conversation_id);
        }
        Commands::Log { conversation_id } => {
            let pool = db::connect(&cfg).await?;
            migrate::run_migrations(&pool).await?;
            let messages = store::list_messages(&pool, conversation_id).await?;
            pool.close().await;

            if messages.is_empty() {
                println!("No messages in conversation {}.", conversation_id);
                return Ok(());
            }

            for message in &messages {
                println!("[{}] {} — {}", message.id, message.role, message.created_at);
                println!("{}", message.content);
                println!();
            }
        }
        Commands::Serve => {
            let pool = db::connect(&cfg).await?;
            server::run_server(&cfg, pool).await?;
        }
    }

    Ok(())
}
