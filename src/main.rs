//! repurpose is a CLI tool that turns a web page into social media content
//! using an LLM model.
//!
//! The tool has three commands, `repurpose` being the default:
//! 1. `repurpose` - Loads a page and prints a LinkedIn post, a tweet thread and key insights
//! 2. `fetch` - Loads a page and prints its extracted text
//! 3. `split` - Loads a page and prints its text split into overlapping chunks

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, info};
use scraper::Selector as ScraperSelector;
use url::Url;

use repurpose::{
    Chunker, Config, ContentSource, TextBy, WebLoader,
    constants::{
        DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CHARS, DEFAULT_MODEL,
        DEFAULT_TEMPERATURE, DEFAULT_URL,
    },
    repurpose::{ModelSettings, RepurposeContext, Scope, build_model, run},
};

/// A CLI tool to repurpose a web page into social media content
///
/// Without a subcommand it behaves like `repurpose repurpose`.
#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    /// The command to execute (repurpose, fetch or split)
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    repurpose: RepurposeArgs,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a LinkedIn post, a tweet thread and key insights from a page
    Repurpose(RepurposeArgs),
    /// Print the text extracted from a page
    Fetch {
        /// URL of the page to load
        #[arg(default_value = DEFAULT_URL)]
        url: Url,
        #[command(flatten)]
        extraction: ExtractArgs,
    },
    /// Print the text of a page split into overlapping chunks
    Split {
        /// URL of the page to load
        #[arg(default_value = DEFAULT_URL)]
        url: Url,
        #[command(flatten)]
        chunking: ChunkArgs,
        #[command(flatten)]
        extraction: ExtractArgs,
    },
}

#[derive(Args)]
struct RepurposeArgs {
    /// URL of the page to repurpose
    #[arg(default_value = DEFAULT_URL)]
    url: Url,
    /// Model to use, as backend://model
    #[arg(long, short, default_value = DEFAULT_MODEL)]
    model: String,
    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,
    /// Path to the file with a prompt template
    #[arg(long, short = 'p')]
    prompt_file: Option<String>,
    /// Number of leading characters sent to the model
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS, conflicts_with = "chunked")]
    max_chars: usize,
    /// Repurpose every chunk of the page instead of its beginning only
    #[arg(long)]
    chunked: bool,
    #[command(flatten)]
    chunking: ChunkArgs,
    #[command(flatten)]
    extraction: ExtractArgs,
}

impl RepurposeArgs {
    fn scope(&self) -> Result<Scope> {
        if self.chunked {
            Ok(Scope::Chunked(self.chunking.chunker()?))
        } else {
            Ok(Scope::Head {
                max_chars: self.max_chars,
            })
        }
    }
}

#[derive(Args)]
struct ExtractArgs {
    /// Text extraction method: "dom_smoothie" (default) or "fast_html2md"
    #[arg(long, default_value = "dom_smoothie")]
    text_by: TextBy,
    /// CSS selector to limit the HTML subset from which content is extracted (optional)
    #[arg(long, short)]
    selector: Option<String>,
}

#[derive(Args)]
struct ChunkArgs {
    /// Maximum chunk length in characters
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    /// Characters shared by consecutive chunks
    #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP)]
    chunk_overlap: usize,
}

impl ChunkArgs {
    fn chunker(&self) -> Result<Chunker> {
        Chunker::new(self.chunk_size, self.chunk_overlap).context("Invalid chunking options")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let config = Config::from_env();

    match cli.command.unwrap_or(Command::Repurpose(cli.repurpose)) {
        Command::Repurpose(args) => {
            let scope = args.scope()?;
            let settings = ModelSettings {
                model: args.model,
                temperature: args.temperature,
            };
            handle_repurpose_command(
                &config,
                args.url,
                settings,
                args.prompt_file,
                scope,
                args.extraction,
            )
            .await
        }
        Command::Fetch { url, extraction } => {
            handle_fetch_command(&config, url, extraction).await
        }
        Command::Split {
            url,
            chunking,
            extraction,
        } => {
            let chunker = chunking.chunker()?;
            handle_split_command(&config, url, chunker, extraction).await
        }
    }
}

fn build_loader(config: &Config, extraction: ExtractArgs) -> Result<WebLoader> {
    let selector = match extraction.selector {
        Some(selector_query) => Some(
            ScraperSelector::parse(&selector_query)
                .map_err(|e| anyhow::anyhow!("Invalid CSS selector: {}", e))?,
        ),
        None => None,
    };
    WebLoader::new(config, extraction.text_by, selector)
}

async fn handle_repurpose_command(
    config: &Config,
    url: Url,
    settings: ModelSettings,
    prompt_file: Option<String>,
    scope: Scope,
    extraction: ExtractArgs,
) -> Result<()> {
    let prompt_template = match prompt_file {
        Some(file) => {
            let content =
                fs::read_to_string(&file).context(format!("Failed to read prompt file: {file}"))?;
            Some(content)
        }
        None => None,
    };

    let loader = build_loader(config, extraction)?;
    let model = build_model(config, &settings)?;
    let ctx = RepurposeContext {
        model: model.as_ref(),
        prompt_template: prompt_template.as_deref(),
    };

    let mut stdout = std::io::stdout().lock();
    run(&loader, &url, &ctx, &scope, &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}

async fn handle_fetch_command(config: &Config, url: Url, extraction: ExtractArgs) -> Result<()> {
    let loader = build_loader(config, extraction)?;
    let document = loader
        .load(&url)
        .await
        .with_context(|| format!("Failed to extract content from {url}"))?;

    if let Some(title) = &document.title {
        info!("Title: {title}");
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", document.text)?;
    Ok(())
}

async fn handle_split_command(
    config: &Config,
    url: Url,
    chunker: Chunker,
    extraction: ExtractArgs,
) -> Result<()> {
    let loader = build_loader(config, extraction)?;
    let document = loader
        .load(&url)
        .await
        .with_context(|| format!("Failed to extract content from {url}"))?;

    let chunks = chunker.chunks(&document.text);
    info!(
        "Split {} characters into {} chunks",
        document.char_count(),
        chunks.len()
    );

    let total = chunks.len();
    let mut stdout = std::io::stdout().lock();
    for chunk in chunks {
        writeln!(
            stdout,
            "--- CHUNK {}/{total} [{}..{}] ---\n{}\n",
            chunk.index + 1,
            chunk.start,
            chunk.end,
            chunk.text
        )?;
    }
    Ok(())
}
