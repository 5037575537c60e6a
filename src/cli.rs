//! CLI definitions for formfill.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// formfill CLI.
#[derive(Parser)]
#[command(name = "formfill")]
#[command(about = "Fill web forms from a stored profile and learned field mappings")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.formfill/config.toml when present)
    #[arg(short, long, global = true, env = "FORMFILL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fill a saved HTML page and report what was written
    Fill {
        /// HTML page to fill
        #[arg(long)]
        page: PathBuf,

        /// Profile JSON to fill from (default: the stored profile)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Bind a page element to a profile key for future fills
    Learn {
        /// HTML page containing the element
        #[arg(long)]
        page: PathBuf,

        /// CSS selector of the element to bind
        #[arg(long)]
        target: String,

        /// Profile key, e.g. `email` or `custom.referral`
        #[arg(long)]
        key: String,
    },

    /// Learned mapping management
    Mappings {
        #[command(subcommand)]
        action: MappingsAction,
    },

    /// Stored profile management
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum MappingsAction {
    /// List learned mappings
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Forget the mapping for one selector
    Remove {
        selector: String,
    },

    /// Forget every learned mapping
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum ProfileAction {
    /// Replace the stored profile with a JSON file
    Import {
        file: PathBuf,
    },

    /// Print the stored profile as JSON
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
