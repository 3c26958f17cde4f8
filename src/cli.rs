//! CLI - Command-line argument parsing
//!
//! Defines the command tree with clap. Execution lives in `main.rs`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use phishguard::services::ReportKind;

/// PhishGuard - check a phone number before you pick up
#[derive(Parser)]
#[command(name = "phishguard")]
#[command(about = "Phone number risk analysis for voice phishing and spam", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides $PHISHGUARD_HOME and ~/.phishguard)
    #[arg(long, global = true, env = "PHISHGUARD_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a phone number
    Analyze {
        /// Number to analyze, in any format
        number: String,
        /// Use this API key instead of the saved one
        #[arg(long)]
        api_key: Option<String>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Print the session state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse past analyses
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Print share text for a past result
    Share {
        /// History entry id, or `latest`
        #[arg(default_value = "latest")]
        id: String,
    },

    /// Print share text recommending the app
    ShareApp,

    /// Print lookup links for a past result
    Links {
        /// History entry id, or `latest`
        #[arg(default_value = "latest")]
        id: String,
    },

    /// Manage the personal API key
    Key {
        #[command(subcommand)]
        action: KeyCommands,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Recommended apps (changes need the admin password)
    Apps {
        #[command(subcommand)]
        action: AppsCommands,
    },

    /// Report a spam or non-existent number
    Report {
        number: String,
        #[arg(long, value_enum, default_value_t = ReportKindArg::Phishing)]
        kind: ReportKindArg,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Show one entry in full
    Show { id: String },
    /// Delete one entry
    Delete { id: String },
    /// Delete every entry
    Clear,
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Save a personal API key
    Set { key: String },
    /// Forget the saved key
    Clear,
    /// Show whether a key is saved
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Change the Gemini model
    SetModel { model: String },
    /// Change the link used in share text
    SetLink { link: String },
    /// Restore defaults
    Reset,
}

#[derive(Subcommand)]
pub enum AppsCommands {
    /// List recommended apps
    List,
    /// Add an app
    Add {
        #[arg(long)]
        password: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Delete an app
    Delete {
        #[arg(long)]
        password: String,
        id: String,
    },
    /// Delete every app
    Clear {
        #[arg(long)]
        password: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportKindArg {
    Phishing,
    Invalid,
}

impl From<ReportKindArg> for ReportKind {
    fn from(arg: ReportKindArg) -> Self {
        match arg {
            ReportKindArg::Phishing => ReportKind::Phishing,
            ReportKindArg::Invalid => ReportKind::Invalid,
        }
    }
}
