use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fable_core::{Persona, Summarizer, SummarizerConfig};
use fable_providers::OpenAiProvider;
use fable_search::{DuckDuckGoSearch, SearchConfig};

mod config;
mod tui;

use config::Config;

/// Name of the environment variable holding the OpenAI credential.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Log level for tracing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Most verbose: all tracing
    Trace,
    /// Verbose: outbound requests/responses
    Debug,
    /// Standard: high-level flow
    Info,
    /// Quiet: only warnings and errors
    Warn,
    /// Minimal: only errors
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser)]
#[command(name = "fable")]
#[command(author, version, about = "Summarize fairy tales through an expert's eyes", long_about = None)]
pub struct Cli {
    /// Fairy-tale title to summarize (one-shot mode; omit for the interactive form)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Expert persona for the summary (psychologist or educator)
    #[arg(short, long, default_value = "psychologist")]
    pub persona: Persona,

    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Base URL for the completion API (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Enable debug logging (shorthand for --log-level debug)
    #[arg(short, long)]
    pub debug: bool,

    /// Write logs to file (JSON-lines format)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Disable the TUI, print the summary to stdout
    #[arg(long)]
    pub no_tui: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // TUI only when interactive and no one-shot title was given
    let will_use_tui = !cli.no_tui && cli.title.is_none() && atty::is(atty::Stream::Stdout);

    // Resolve log level: --debug overrides --log-level
    let log_level = if cli.debug {
        LogLevel::Debug
    } else {
        cli.log_level
    };

    // Set up logging
    let filter = EnvFilter::new(log_level.as_filter());

    if will_use_tui && cli.log_file.is_none() {
        // TUI mode without log file: suppress all tracing output
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    } else if let Some(ref log_path) = cli.log_file {
        // Log file specified: write JSON to file
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to create log file: {:?}", log_path))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::sync::Mutex::new(file)))
            .init();
    } else {
        // Non-TUI mode: write to stderr
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Fatal startup precondition: the credential must be present before
    // any interface is constructed.
    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => anyhow::bail!(
            "The {} environment variable is not set. \
             Export your OpenAI API key and run fable again.",
            API_KEY_VAR
        ),
    };

    let config = Config::load()?;
    let summarizer = build_summarizer(&cli, &config, api_key);

    if let Some(ref title) = cli.title {
        one_shot(&summarizer, title, cli.persona).await
    } else if will_use_tui {
        tui::run_tui(Arc::new(summarizer), cli.persona).await
    } else {
        anyhow::bail!("No title given and stdout is not a terminal. Pass --title \"...\".")
    }
}

/// Wire the search and completion capabilities into the pipeline.
fn build_summarizer(cli: &Cli, config: &Config, api_key: String) -> Summarizer {
    let mut search_config = SearchConfig::default();
    if let Some(ref base_url) = config.search.base_url {
        search_config.base_url = base_url.clone();
    }
    if let Some(max_chars) = config.search.max_chars {
        search_config.max_chars = max_chars;
    }
    let search = DuckDuckGoSearch::new(search_config);

    let mut provider = OpenAiProvider::new(api_key);
    if let Some(base_url) = cli.base_url.clone().or_else(|| config.base_url.clone()) {
        provider = provider.with_base_url(base_url);
    }

    let defaults = SummarizerConfig::default();
    let summarizer_config = SummarizerConfig {
        model: cli
            .model
            .clone()
            .or_else(|| config.model.clone())
            .unwrap_or(defaults.model),
        temperature: cli
            .temperature
            .or(config.temperature)
            .unwrap_or(defaults.temperature),
        max_tokens: config.max_tokens,
    };

    Summarizer::new(Arc::new(search), Arc::new(provider), summarizer_config)
}

/// One-shot mode: run the pipeline once and print the display text.
async fn one_shot(summarizer: &Summarizer, title: &str, persona: Persona) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Please enter a title.");
    }

    let summary = summarizer
        .summarize(title, persona)
        .await
        .context("Search failed")?;

    println!("{}", summary.display_text());
    Ok(())
}
