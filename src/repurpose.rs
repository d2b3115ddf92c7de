//! The repurpose module fills the prompt template with page text, asks an LLM
//! model for repurposed content and writes the model's answer out.

use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatMessageBuilder, ChatProvider};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::chunk::Chunker;
use crate::config::Config;
use crate::constants::{
    DEFAULT_MAX_CHARS, DEFAULT_MODEL, DEFAULT_PROMPT_TEMPLATE, DEFAULT_TEMPERATURE, RESULT_BANNER,
    THINK_STRIPPER,
};
use crate::fetch::ContentSource;

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

/// Which model to talk to and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Model given as `backend://model`, e.g. `groq://llama-3.3-70b-versatile`
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// How much of the page is sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Only the first `max_chars` characters, in a single request.
    Head { max_chars: usize },
    /// Every chunk, one request per chunk.
    Chunked(Chunker),
}

impl Default for Scope {
    fn default() -> Self {
        Self::Head {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Shared data for repurposing requests
pub struct RepurposeContext<'a> {
    /// LLM model generating the content
    pub model: &'a dyn ChatProvider,
    /// Prompt template to use instead of the default one
    pub prompt_template: Option<&'a str>,
}

/// Splits a `backend://model` string into a backend and a model name.
///
/// A user part is appended to the model name after a colon, so
/// `ollama://8b@llama3` names the `llama3:8b` model.
///
/// # Errors
///
/// Returns an error if the string is not a URL, the backend is unknown
/// or the model name is missing.
pub fn parse_model(model: &str) -> Result<(LLMBackend, String)> {
    let model_url = Url::parse(model).map_err(|e| anyhow!("Invalid model URL: {e}"))?;
    let backend = LLMBackend::from_str(model_url.scheme())
        .map_err(|e| anyhow!("Invalid LLM backend: {e}"))?;
    let name = [
        model_url
            .host_str()
            .context("Specify model name as host URL.")?,
        model_url.username(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(":");

    Ok((backend, name))
}

/// Builds the chat model described by `settings`.
///
/// # Errors
///
/// Returns an error if the model string is invalid or the backend
/// rejects the configuration.
pub fn build_model(config: &Config, settings: &ModelSettings) -> Result<Box<dyn LLMProvider>> {
    let (backend, name) = parse_model(&settings.model)?;
    info!("Using model {name} with temperature {}", settings.temperature);

    let builder = LLMBuilder::new()
        .backend(backend)
        .model(name)
        .temperature(settings.temperature);

    let builder = match &config.api_key {
        Some(api_key) => builder.api_key(api_key.clone()),
        None => builder,
    };

    builder
        .build()
        .map_err(|e| anyhow!("Failed to build LLM model: {e}"))
}

/// Substitutes the `{text}` and `{url}` placeholders of `template`.
pub fn fill_prompt(template: &str, url: &str, text: &str) -> String {
    template.replace("{url}", url).replace("{text}", text)
}

/// Asks the model to repurpose a single piece of text.
///
/// # Errors
///
/// Returns an error if the LLM chat request fails.
pub async fn repurpose_text(
    text: &str,
    url: &str,
    ctx: &RepurposeContext<'_>,
) -> Result<String> {
    let prompt_template = ctx.prompt_template.unwrap_or(DEFAULT_PROMPT_TEMPLATE);
    let prompt = fill_prompt(prompt_template, url, text);

    let mut messages: Vec<ChatMessageBuilder> = vec![ChatMessage::user().content(prompt)];

    if !prompt_template.contains("{text}") {
        messages.push(ChatMessage::user().content(text));
    }

    let messages: Vec<ChatMessage> = messages
        .into_iter()
        .map(|message| message.build())
        .collect();

    let response = ctx
        .model
        .chat(&messages)
        .await
        .map_err(|err| anyhow!("LLM error: {err}."))?
        .to_string();

    Ok(THINK_STRIPPER_REGEX
        .replace_all(&response, "")
        .trim()
        .to_owned())
}

/// Loads `url`, repurposes its content and writes the result to `out`.
///
/// Every request completes before anything is written, so a failed
/// generation leaves `out` untouched.
///
/// # Errors
///
/// Returns an error if:
/// * The content cannot be loaded
/// * Any LLM request fails
/// * Writing to `out` fails
pub async fn run<S, W>(
    source: &S,
    url: &Url,
    ctx: &RepurposeContext<'_>,
    scope: &Scope,
    out: &mut W,
) -> Result<()>
where
    S: ContentSource + ?Sized,
    W: Write,
{
    let document = source
        .load(url)
        .await
        .with_context(|| format!("Failed to extract content from {url}"))?;

    let parts = match scope {
        Scope::Head { max_chars } => vec![document.head(*max_chars).to_owned()],
        Scope::Chunked(chunker) => chunker.split_text(&document.text),
    };
    let total = parts.len();

    let mut responses = Vec::with_capacity(total);
    for (index, part) in parts.iter().enumerate() {
        info!(
            "Repurposing part {}/{total} ({} characters)...",
            index + 1,
            part.chars().count()
        );
        let response = repurpose_text(part, url.as_str(), ctx)
            .await
            .context("An error occurred while generating content")?;
        debug!("Received {} characters for part {}", response.len(), index + 1);
        responses.push(response);
    }

    writeln!(out, "\n{RESULT_BANNER}")?;
    if let [response] = responses.as_slice() {
        writeln!(out, "{response}")?;
    } else {
        for (index, response) in responses.iter().enumerate() {
            writeln!(out, "\n--- PART {}/{total} ---\n{response}", index + 1)?;
        }
    }

    Ok(())
}
