//! # API Module
//!
//! This module handles interactions with the OpenAI compatible chat API for
//! generating answers.
//!
//! Each call is independent and single-turn: the system prompt from the
//! active [`ChatTemplate`] plus one user message carrying the rendered
//! context/query prompt. The backend's generated text is returned verbatim.
//! Responses can be fetched buffered or streamed to the terminal, matching
//! the `should_stream` configuration.
//!
//! Backend failures propagate as errors for that turn only; the session
//! loop decides what to do with them.

use crate::{
    config::FaqBotConfig,
    template::{self, ChatTemplate},
};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
};
use crossterm::{
    ExecutableCommand,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
};
use futures::StreamExt;
use std::{
    error::Error,
    io::{Write, stdout},
};
use tracing::{debug, error};

/// Creates a new OpenAI API client from configuration.
///
/// # Parameters
/// - `config: &FaqBotConfig`: Configuration containing API base and key.
///
/// # Returns
/// - `Result<Client<OpenAIConfig>, Box<dyn Error>>`: Created client or an error if initialization fails.
fn create_client(config: &FaqBotConfig) -> Result<Client<OpenAIConfig>, Box<dyn Error>> {
    let openai_config = OpenAIConfig::new()
        .with_api_key(config.api_key.clone())
        .with_api_base(config.api_base.clone());
    debug!("Client created with config: {:?}", openai_config);
    Ok(Client::with_config(openai_config))
}

/// Builds the single-turn chat request: system prompt plus one user message
/// carrying the rendered context/query prompt.
fn build_request(
    config: &FaqBotConfig,
    chat_template: &ChatTemplate,
    question: &str,
    context: &str,
) -> Result<CreateChatCompletionRequest, Box<dyn Error>> {
    let prompt = template::render_prompt(context, question);

    let messages = vec![
        ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
            content: ChatCompletionRequestSystemMessageContent::Text(
                chat_template.system_prompt.clone(),
            ),
            name: None,
        }),
        ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(prompt),
            name: None,
        }),
    ];

    Ok(CreateChatCompletionRequestArgs::default()
        .model(config.model.clone())
        .messages(messages)
        .build()?)
}

/// Generate an answer for `question` given the retrieved FAQ `context`.
///
/// Dispatches to the streaming or buffered path according to
/// `config.should_stream`. The streaming path prints deltas to the terminal
/// as they arrive; the buffered path prints nothing and leaves output to
/// the caller. Both return the full generated text.
///
/// # Errors
/// Propagates request-building and backend failures. No retry is attempted.
pub async fn respond(
    config: &FaqBotConfig,
    chat_template: &ChatTemplate,
    question: &str,
    context: &str,
) -> Result<String, Box<dyn Error>> {
    let client = create_client(config)?;
    let request = build_request(config, chat_template, question, context)?;
    debug!("Sending request: {:?}", request);

    if config.streaming() {
        stream_response(&client, request).await
    } else {
        fetch_response(&client, request).await
    }
}

/// Fetch the complete response in one call and return its text.
async fn fetch_response(
    client: &Client<OpenAIConfig>,
    request: CreateChatCompletionRequest,
) -> Result<String, Box<dyn Error>> {
    let response = client.chat().create(request).await?;

    let mut response_string = String::new();
    response.choices.iter().for_each(|chat_choice| {
        if let Some(ref message_text) = chat_choice.message.content {
            response_string.push_str(message_text);
        }
    });

    Ok(response_string)
}

/// Stream the response, printing deltas to the console with formatting, and
/// return the accumulated text.
async fn stream_response(
    client: &Client<OpenAIConfig>,
    request: CreateChatCompletionRequest,
) -> Result<String, Box<dyn Error>> {
    let mut response_string = String::new();

    let mut stream = client.chat().create_stream(request).await?;
    let mut lock = stdout().lock();
    let mut stdout = std::io::stdout();
    stdout.execute(SetForegroundColor(Color::Blue))?;
    stdout.execute(SetAttribute(Attribute::Bold))?;

    while let Some(result) = stream.next().await {
        match result {
            Ok(response) => {
                debug!("Received response: {:?}", response);
                response.choices.iter().for_each(|chat_choice| {
                    if let Some(ref content) = chat_choice.delta.content {
                        response_string.push_str(content);
                        write!(lock, "{content}").unwrap();
                    }
                });
            }
            Err(err) => {
                error!("Received error: {}", err);
                writeln!(lock, "error: {err}").unwrap();
            }
        }
        stdout.flush()?;
    }

    stdout.execute(SetAttribute(Attribute::Reset))?;
    stdout.execute(SetForegroundColor(Color::Reset))?;

    drop(lock);

    Ok(response_string)
}
