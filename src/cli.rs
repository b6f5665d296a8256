//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// readmate CLI.
#[derive(Parser)]
#[command(name = "readmate")]
#[command(about = "Reading assistant engine: theming, reading aids, page translation")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings file (API key, saved themes); defaults to ~/.readmate/settings.json
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate the main content of an HTML document, batch by batch
    Translate {
        /// HTML document to translate
        file: PathBuf,

        /// Target language code (en, uk, ru, es, de, fr) or full name
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Units per remote exchange
        #[arg(long, default_value_t = 25)]
        batch_size: usize,

        /// Write the translated document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a color theme to an HTML document
    Theme {
        /// HTML document to re-theme
        file: PathBuf,

        /// Theme name (default, light, dark, sepia, gray, night, custom).
        /// Omitted: re-apply the theme last saved for this document.
        #[arg(short, long)]
        name: Option<String>,

        /// Write the themed document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a reading aid over a piece of text
    Aid {
        /// Which aid to run
        #[arg(value_enum)]
        kind: AidKind,

        /// The text to process
        text: String,

        /// Page title supplied as context
        #[arg(long)]
        title: Option<String>,

        /// Render the answer's markdown to HTML instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Manage the API credential
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AidKind {
    Simplify,
    Explain,
    Summarize,
}

#[derive(Subcommand)]
pub enum KeyAction {
    /// Store the OpenRouter API key
    Save { api_key: String },

    /// Report whether a key is configured
    Check,
}
