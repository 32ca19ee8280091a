//! Main module for the FaqBot CLI application.
//!
//! This module provides the main function and auxiliary functionalities for
//! the CLI application. It handles command parsing, configuration loading, and
//! initialization, as well as invoking the appropriate functionalities based on
//! the provided command-line arguments.
//!
//! # Examples
//!
//! Running the interactive FAQ session:
//!
//! ```sh
//! cargo run -- chat
//! faqbot chat
//! ```
//!
//! Asking a single question:
//!
//! ```sh
//! faqbot ask "How long do refunds take?"
//! ```
//!
//! Initializing the application's configuration and templates:
//!
//! ```sh
//! faqbot init
//! ```

use clap::Parser;
use faqbot::{commands, config, config_dir, session, template};
use once_cell::sync::OnceCell;
use std::{env, error::Error, fs, path::Path};
use tracing::{debug, info};

static TRACING: OnceCell<()> = OnceCell::new();

fn main() -> Result<(), Box<dyn Error>> {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt::init();
    });
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run())
}

/// Main asynchronous function of the FaqBot CLI application.
///
/// Loads configuration, parses command-line arguments, and executes the
/// appropriate command.
///
/// # Errors
///
/// Returns an error if there is an issue loading the configuration, parsing the
/// command-line arguments, or executing the specified command.
async fn run() -> Result<(), Box<dyn Error>> {
    let cli = commands::Cli::parse();

    match cli.command {
        commands::Commands::Chat { faq } => {
            let mut faqbot_config = load_config()?;
            if faq.is_some() {
                faqbot_config.faq_path = faq;
            }
            session::run(&faqbot_config).await?;
        }
        commands::Commands::Ask { question, faq } => {
            let mut faqbot_config = load_config()?;
            if faq.is_some() {
                faqbot_config.faq_path = faq;
            }
            let question =
                question.unwrap_or_else(|| "How long do refunds take?".to_string());
            debug!("Asking question: {:?}", question);
            let answer = session::ask_once(&faqbot_config, &question).await?;
            if !faqbot_config.streaming() {
                println!("{answer}");
            }
        }
        commands::Commands::Init => {
            debug!("Initializing configuration");
            init()?;
        }
    }

    Ok(())
}

/// Load the configuration from `$FAQBOT_CONFIG` if set, otherwise from the
/// per-platform config directory.
fn load_config() -> Result<config::FaqBotConfig, Box<dyn Error>> {
    let config_path = if let Ok(path) = env::var("FAQBOT_CONFIG") {
        path
    } else {
        config_dir()?
            .join("config.yaml")
            .to_string_lossy()
            .into_owned()
    };

    debug!("Loading config from: {config_path}");
    config::load_config(&config_path)
}

/// Initializes the application's configuration, template, and a starter FAQ.
///
/// Creates the necessary directories and files: a default `config.yaml`, the
/// `faq_answer` chat template, and a sample `faq.txt` in the current
/// directory when none exists.
///
/// # Errors
///
/// Returns an error if there is an issue creating the directories or files, or
/// serializing the configuration and template to YAML.
fn init() -> Result<(), Box<dyn Error>> {
    let config_dir = config_dir()?;
    let templates_path = config_dir.join("templates");
    info!("Creating template config directory: {}", templates_path.display());
    fs::create_dir_all(&templates_path)?;

    let template_path = templates_path.join("faq_answer.yaml");
    info!("Creating template file: {}", template_path.display());
    let chat_template = template::ChatTemplate::default();
    let template_yaml = serde_yaml::to_string(&chat_template)?;
    fs::write(template_path, template_yaml)?;

    let config_path = config_dir.join("config.yaml");
    info!("Creating config file: {}", config_path.display());
    let faqbot_config = config::FaqBotConfig {
        api_base: "http://localhost:11434/v1".to_string(),
        api_key: "CHANGEME".to_string(),
        model: "llama3.2".to_string(),
        should_stream: Some(false),
        faq_path: Some(config::DEFAULT_FAQ_PATH.to_string()),
    };
    let config_yaml = serde_yaml::to_string(&faqbot_config)?;
    fs::write(config_path, config_yaml)?;

    let faq_path = Path::new(config::DEFAULT_FAQ_PATH);
    if !faq_path.exists() {
        info!("Creating starter FAQ file: {}", faq_path.display());
        fs::write(
            faq_path,
            "Q: How long do refunds take?\n\
             A: Refunds are processed within 5 business days.\n\n\
             Q: Do you deliver on weekends?\n\
             A: Deliveries run Monday through Saturday, 9am to 5pm.\n\n\
             Q: Which payment methods do you accept?\n\
             A: We accept credit cards, debit cards, and PayPal.\n",
        )?;
    }

    Ok(())
}
