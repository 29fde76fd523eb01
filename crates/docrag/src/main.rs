//! # docrag CLI
//!
//! Command-line interface for docrag: semantic retrieval and question
//! answering over a directory of documents.
//!
//! ## Commands
//!
//! - `docrag index <DIR>` - build the corpus once and report its shape
//! - `docrag query <DIR> <QUERY>` - retrieve the nearest chunks
//! - `docrag ask <DIR> <QUESTION>` - retrieve context and ask the chat model
//! - `docrag serve <DIR>` - run the web form and `/chat` endpoint
//!
//! The corpus lives only in memory: every invocation rebuilds it from the
//! directory, and `serve` keeps it for the lifetime of the process.
//!
//! ## Examples
//!
//! ```bash
//! docrag index ~/Documents
//! docrag query ~/Documents "termination clause" -k 3
//! GEMINI_API_KEY=... docrag ask ~/Documents "when does the lease end?"
//! docrag serve ~/Documents --addr 127.0.0.1:5000
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use docrag_chat::{ChatService, GeminiClient, PromptTemplate};
use docrag_core::{ChunkConfig, ContextHit, TextEncoder};
use docrag_embed::BertEncoder;
use docrag_retrieve::{ContextRetriever, RetrieverConfig};
use docrag_server::AppState;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "docrag")]
#[command(about = "Semantic retrieval and question answering over your documents")]
#[command(version)]
struct Cli {
    /// Path to config file (default: XDG config dir / config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the corpus and print its shape
    Index {
        /// Directory of documents
        dir: PathBuf,
    },

    /// Retrieve the chunks nearest to a query
    Query {
        /// Directory of documents
        dir: PathBuf,

        /// Query text
        query: String,

        /// Number of chunks to return
        #[arg(short)]
        k: Option<usize>,
    },

    /// Retrieve context and ask the chat model for an answer
    Ask {
        /// Directory of documents
        dir: PathBuf,

        /// The question
        question: String,

        /// Number of context chunks
        #[arg(short, default_value = "3")]
        k: usize,
    },

    /// Serve the web form and /chat endpoint
    Serve {
        /// Directory of documents
        dir: PathBuf,

        /// Bind address (overrides config)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Index { dir } => {
            let retriever = build_retriever(&dir, &config)?;
            println!(
                "indexed {} chunks ({} dims, model {})",
                retriever.chunk_count(),
                retriever.dimension(),
                retriever.model_name()
            );
            if !retriever.skipped_files().is_empty() {
                println!("skipped {} unsupported files:", retriever.skipped_files().len());
                for name in retriever.skipped_files() {
                    println!("  {name}");
                }
            }
        }

        Commands::Query { dir, query, k } => {
            let retriever = build_retriever(&dir, &config)?;
            let k = k.unwrap_or(config.retrieval.k);
            let hits = retriever.get_context(&query, k)?;
            print_hits(&hits, cli.format)?;
        }

        Commands::Ask { dir, question, k } => {
            let chat = chat_client(&config)?;
            let retriever = build_retriever(&dir, &config)?;

            let hits = retriever.get_context(&question, k)?;
            let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
            let prompt = PromptTemplate::default().render(&question, &texts);

            let answer = chat.generate(&prompt).await?;
            println!("{answer}");
        }

        Commands::Serve { dir, addr } => {
            let chat = chat_client(&config)?;
            let retriever = build_retriever(&dir, &config)?;

            let addr: SocketAddr = addr
                .unwrap_or(config.server.addr)
                .parse()
                .context("invalid bind address")?;
            info!("serving {} chunks from {:?}", retriever.chunk_count(), dir);
            let state = AppState::new(Arc::new(retriever), Arc::new(chat));
            docrag_server::serve(addr, state).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the encoder and build the corpus for one directory.
fn build_retriever(dir: &std::path::Path, config: &Config) -> Result<ContextRetriever> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let encoder = BertEncoder::load()
        .context("failed to load the embedding model")?
        .with_batch_size(config.embedding.batch_size);
    let encoder: Arc<dyn TextEncoder> = Arc::new(encoder);

    let retriever_config = RetrieverConfig {
        chunking: ChunkConfig::new(config.chunking.chunk_size)?,
    };
    Ok(ContextRetriever::build(dir, encoder, retriever_config)?)
}

fn chat_client(config: &Config) -> Result<GeminiClient> {
    let api_key = config
        .api_key()
        .context("no chat API key: set GEMINI_API_KEY or [chat] api_key")?;

    Ok(match &config.chat.model {
        Some(model) => GeminiClient::with_model(api_key, model)?,
        None => GeminiClient::new(api_key)?,
    })
}

fn print_hits(hits: &[ContextHit], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(hits)?),
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("no results");
            }
            for (rank, hit) in hits.iter().enumerate() {
                let location = match hit.metadata.page {
                    Some(page) => format!("{} p.{}", hit.metadata.file_name, page),
                    None => hit.metadata.file_name.clone(),
                };
                println!(
                    "{}. {} (chunk {}, d²={:.4})",
                    rank + 1,
                    location,
                    hit.metadata.chunk_index,
                    hit.distance
                );
                println!("   {}", hit.text);
            }
        }
    }
    Ok(())
}
