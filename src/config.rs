//! This module provides functionality for loading and handling the application's configuration.
//!
//! It defines the `FaqBotConfig` struct, which holds the configuration parameters,
//! and a `load_config` function to load the configuration from a file.
//!
//! # Examples
//!
//! Loading the configuration from a file:
//!
//! ```no_run
//! use faqbot::config::{FaqBotConfig, load_config};
//!
//! let config: FaqBotConfig = load_config("/path/to/config.yaml").unwrap();
//! println!("{:?}", config);
//! ```

use serde::{Deserialize, Serialize};
use std::{error::Error, fs};

use tracing::debug;

/// The FAQ file consulted when neither the config nor the CLI names one.
pub const DEFAULT_FAQ_PATH: &str = "faq.txt";

/// Represents the application's configuration.
///
/// This struct holds the configuration parameters needed to run the bot,
/// such as the API key, API base URL, and model name. It can be constructed
/// by loading a YAML configuration file using the `load_config` function.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct FaqBotConfig {
    /// The API key used to authenticate requests to the API.
    pub api_key: String,

    /// The base URL of the API.
    pub api_base: String,

    /// The name of the model to be used for generating responses.
    pub model: String,

    /// Whether assistant responses should be streamed to the terminal.
    pub should_stream: Option<bool>,

    /// Path of the FAQ file to index. Defaults to `faq.txt`.
    pub faq_path: Option<String>,
}

impl FaqBotConfig {
    /// The effective FAQ file path, falling back to [`DEFAULT_FAQ_PATH`].
    pub fn faq_path(&self) -> &str {
        self.faq_path.as_deref().unwrap_or(DEFAULT_FAQ_PATH)
    }

    /// Whether responses are streamed. Unset means buffered.
    pub fn streaming(&self) -> bool {
        self.should_stream.unwrap_or(false)
    }
}

/// Loads the application's configuration from a YAML file.
///
/// This function reads the file at the given path, parses it as YAML, and
/// constructs a `FaqBotConfig` struct from it.
///
/// # Parameters
///
/// - `file`: The path to the YAML configuration file.
///
/// # Returns
///
/// - `Ok(FaqBotConfig)`: The loaded configuration.
/// - `Err(Box<dyn Error>)`: An error occurred while reading the file or parsing the YAML.
///
/// # Examples
///
/// ```no_run
/// use faqbot::config::load_config;
///
/// match load_config("/path/to/config.yaml") {
///     Ok(config) => println!("{:?}", config),
///     Err(err) => eprintln!("Error loading config: {}", err),
/// }
/// ```
pub fn load_config(file: &str) -> Result<FaqBotConfig, Box<dyn Error>> {
    debug!("Loading config: {file}");
    let content = fs::read_to_string(file)?;
    let config: FaqBotConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}
