//! # Session loop
//!
//! Orchestrates a chat session: build the FAQ store once (blocking, a
//! one-time cost proportional to corpus size), then loop reading one line
//! at a time from stdin, routing it through retrieval and the chat backend,
//! and printing the answer. The literal command `exit` (any letter case)
//! ends the session without touching the retriever; end-of-stream does the
//! same.
//!
//! Startup failures (missing FAQ file, unloadable model) are fatal and the
//! session never starts. Per-turn failures (backend unreachable, embedding
//! error) are reported inline and the loop returns to waiting for input.

use crossterm::{
    ExecutableCommand,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
};
use std::{
    error::Error,
    io::{BufRead, Write, stdin, stdout},
    path::Path,
};
use tracing::{debug, error};

use crate::{
    api,
    config::FaqBotConfig,
    embedder::Embedder,
    splitter,
    store::FaqStore,
    template::{self, ChatTemplate},
};

/// Context handed to the backend when retrieval finds nothing (empty corpus).
pub const NO_MATCH_CONTEXT: &str = "No relevant FAQ found.";

/// Whether a line of input is the session-ending command.
fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}

/// Load the model, index the FAQ file, and return the ready pipeline.
///
/// # Errors
/// Fatal on a missing/unreadable FAQ file or an unloadable embedding model.
async fn bootstrap(
    config: &FaqBotConfig,
) -> Result<(ChatTemplate, Embedder, FaqStore), Box<dyn Error>> {
    let chat_template = template::load_template("faq_answer").await.unwrap_or_default();
    let embedder = Embedder::load()?;
    let chunks = splitter::load_chunks(Path::new(config.faq_path()))?;
    let store = FaqStore::from_chunks(&embedder, chunks)?;
    Ok((chat_template, embedder, store))
}

/// Run one query turn: embed, retrieve, respond.
///
/// A retrieval miss is not an error; the [`NO_MATCH_CONTEXT`] stand-in is
/// still sent to the backend as context.
async fn answer_turn(
    config: &FaqBotConfig,
    chat_template: &ChatTemplate,
    embedder: &Embedder,
    store: &FaqStore,
    question: &str,
) -> Result<String, Box<dyn Error>> {
    let query_vector = embedder.embed_one(question)?;
    let context = store.retrieve(&query_vector)?.unwrap_or(NO_MATCH_CONTEXT);
    debug!("Retrieved context: {context}");
    api::respond(config, chat_template, question, context).await
}

/// Enter the interactive session loop.
///
/// Builds the FAQ store once, then answers queries from stdin until the
/// user types `exit` or the input stream ends.
pub async fn run(config: &FaqBotConfig) -> Result<(), Box<dyn Error>> {
    let (chat_template, embedder, store) = bootstrap(config).await?;

    println!(
        "Welcome to FaqBot! {} FAQ chunks loaded. Ask a question, or type 'exit' to leave.",
        store.len()
    );

    let stdin = stdin();
    let mut stdout = stdout();
    loop {
        write!(stdout, "User: ")?;
        stdout.flush()?;

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 || is_exit_command(&line) {
            println!("Goodbye! Have a great day!");
            break;
        }

        let question = line.trim();
        match answer_turn(config, &chat_template, &embedder, &store, question).await {
            Ok(answer) => print_answer(config, &answer)?,
            Err(e) => {
                error!("Turn failed: {e}");
                eprintln!("error: {e}");
            }
        }
    }

    Ok(())
}

/// Answer a single question and exit (the `ask` subcommand).
pub async fn ask_once(config: &FaqBotConfig, question: &str) -> Result<String, Box<dyn Error>> {
    let (chat_template, embedder, store) = bootstrap(config).await?;
    answer_turn(config, &chat_template, &embedder, &store, question).await
}

/// Print the bot's answer. The streaming path has already written the text
/// while it arrived, so only the buffered path prints the body here.
fn print_answer(config: &FaqBotConfig, answer: &str) -> Result<(), Box<dyn Error>> {
    let mut stdout = stdout();
    if config.streaming() {
        writeln!(stdout)?;
        return Ok(());
    }
    stdout.execute(SetForegroundColor(Color::Blue))?;
    stdout.execute(SetAttribute(Attribute::Bold))?;
    writeln!(stdout, "Bot: {answer}\n")?;
    stdout.execute(SetAttribute(Attribute::Reset))?;
    stdout.execute(SetForegroundColor(Color::Reset))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_command_is_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("Exit"));
        assert!(is_exit_command("  exit \n"));
    }

    #[test]
    fn test_questions_are_not_exit_commands() {
        assert!(!is_exit_command("how do I exit the app?"));
        assert!(!is_exit_command("exit?"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn test_no_match_context_is_forwarded_for_empty_store() {
        let store = FaqStore::from_vectors(2, Vec::new(), Vec::new()).unwrap();
        let context = store
            .retrieve(&[0.0, 0.0])
            .unwrap()
            .unwrap_or(NO_MATCH_CONTEXT);
        assert_eq!(context, NO_MATCH_CONTEXT);
    }
}
