//! This module defines the command-line interface for the application using `clap`.
//!
//! It provides a `Cli` struct that represents the parsed command-line arguments,
//! and a `Commands` enum that represents the available subcommands and their
//! options.

use clap::{Parser, Subcommand};

/// Represents the parsed command-line arguments.
///
/// This struct is constructed by parsing the command-line arguments using `clap`.
/// It contains a `command` field that holds the parsed subcommand and its options.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, propagate_version = true, color = clap::ColorChoice::Always)]
pub struct Cli {
    /// The parsed subcommand and its options.
    #[command(subcommand)]
    pub command: Commands,
}

/// Represents the available subcommands and their options.
///
/// Each variant of this enum corresponds to a subcommand that the user can invoke
/// from the command line, along with any options specific to that subcommand.
#[derive(Subcommand, Debug)]
#[command(about, long_about = None, color = clap::ColorChoice::Always)]
pub enum Commands {
    /// The 'chat' subcommand: the interactive FAQ session.
    ///
    /// Builds the FAQ index once, then answers questions from stdin until
    /// the user types 'exit'.
    #[clap(name = "chat", alias = "c")]
    Chat {
        /// Path to the FAQ file. Defaults to `faq.txt` in the current directory
        /// (or the `faq_path` configured in config.yaml).
        #[arg(name = "faq", short = 'f')]
        faq: Option<String>,
    },

    /// The 'ask' subcommand: answer a single question and exit.
    ///
    /// If the question is not provided on the command line, a default question
    /// will be used.
    #[clap(name = "ask", alias = "a")]
    Ask {
        /// The question to be asked. If not provided, a default question is used.
        question: Option<String>,

        #[arg(name = "faq", short = 'f')]
        faq: Option<String>,
    },

    /// The 'init' subcommand, which takes no arguments and is used for initialization.
    ///
    /// When invoked, this subcommand performs setup and initialization tasks, such
    /// as creating the configuration directory, a default config and template,
    /// and a starter FAQ file.
    Init,
}
