//! # FaqBot (library root)
//!
//! This crate provides the plumbing for **FaqBot**, a small
//! retrieval-augmented chatbot over a single FAQ text file:
//! - FAQ loading & chunking (`splitter`).
//! - Sentence embeddings via Candle (`embedder`).
//! - Exact nearest-neighbor search over squared L2 distance (`index`, `store`).
//! - Chat API bindings against OpenAI compatible backends (`api`).
//! - Prompt/template handling (`template`).
//! - The interactive session loop (`session`).
//! - CLI parsing & configuration (`commands`, `config`).
//!
//! The pipeline is deliberately linear: the FAQ file is chunked and embedded
//! once at startup, the chunk vectors are frozen into a flat index, and each
//! user turn embeds the query, retrieves the single closest chunk, and hands
//! it to the chat backend as context. Nothing is persisted across runs.
//!
//! ## Quick example
//! ```no_run
//! use faqbot::embedder::Embedder;
//! use faqbot::splitter;
//! use faqbot::store::FaqStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = Embedder::load()?;
//! let chunks = splitter::load_chunks(std::path::Path::new("faq.txt"))?;
//! let store = FaqStore::from_chunks(&embedder, chunks)?;
//! let query = embedder.embed_one("How long do refunds take?")?;
//! println!("context: {:?}", store.retrieve(&query)?);
//! # Ok(()) }
//! ```

use directories::ProjectDirs;
use std::error::Error;

pub mod api;
pub mod commands;
pub mod config;
pub mod embedder;
pub mod index;
pub mod session;
pub mod splitter;
pub mod store;
pub mod template;

/// Return the per-platform configuration directory used by FaqBot.
///
/// This uses [`directories::ProjectDirs`] with the application triple
/// `("com", "awful-sec", "faqbot")`, so you get the right place on each OS
/// (e.g., `~/Library/Application Support/com.awful-sec.faqbot` on macOS,
/// `~/.config/faqbot` on Linux via XDG).
///
/// The directory is **not** created by this function; callers that need it
/// should create it with `fs::create_dir_all`.
///
/// # Errors
/// Returns an error if the platform configuration directory cannot be
/// determined (rare, but possible in heavily sandboxed environments).
pub fn config_dir() -> Result<std::path::PathBuf, Box<dyn Error>> {
    let proj_dirs = ProjectDirs::from("com", "awful-sec", "faqbot")
        .ok_or("Unable to determine config directory")?;
    Ok(proj_dirs.config_dir().to_path_buf())
}
