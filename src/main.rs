//! formfill - profile-driven form filling
//!
//! Command-line host for the fill engine: fills saved HTML pages, records
//! learned field mappings, and manages the stored profile.

mod cli;
mod cmd_fill;
mod cmd_learn;
mod cmd_mappings;
mod cmd_profile;
mod engine;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use formfill_config::{ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};
use crate::engine::Engine;

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so `--format json` output stays parseable.
    let console = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let file = if logging.file_output {
        let log_dir = logging.resolved_directory();
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("formfill")
            .filename_suffix("log")
            .max_log_files(logging.max_files)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes buffered lines on drop; keep it for the whole run.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    let warnings = ConfigValidator::validate(&config).into_result()?;

    init_tracing(&config.logging)?;
    for warning in &warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    debug!("formfill v{}", env!("CARGO_PKG_VERSION"));

    let engine = Engine::from_config(&config);

    match cli.command {
        Commands::Fill {
            page,
            profile,
            format,
        } => cmd_fill::handle_fill(&engine, &page, profile.as_deref(), format).await,
        Commands::Learn { page, target, key } => {
            cmd_learn::handle_learn(&engine, &page, &target, &key).await
        }
        Commands::Mappings { action } => {
            cmd_mappings::handle_mappings_command(&engine, action).await
        }
        Commands::Profile { action } => cmd_profile::handle_profile_command(&engine, action).await,
    }
}
