//! `mappings` subcommand handlers.

use tracing::info;

use crate::cli::{MappingsAction, OutputFormat};
use crate::engine::Engine;

pub(crate) async fn handle_mappings_command(
    engine: &Engine,
    action: MappingsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MappingsAction::List { format } => mappings_list(engine, format).await,
        MappingsAction::Remove { selector } => {
            if engine.mappings.remove(&selector).await? {
                println!("Removed mapping for {}", selector);
            } else {
                println!("No mapping for {}", selector);
            }
            Ok(())
        }
        MappingsAction::Clear => {
            engine.mappings.clear().await?;
            info!("Cleared record {}", engine.mappings.record());
            println!("All learned mappings removed.");
            Ok(())
        }
    }
}

async fn mappings_list(
    engine: &Engine,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mappings = engine.mappings.load().await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&mappings)?);
        return Ok(());
    }

    if mappings.is_empty() {
        println!("No learned mappings.");
        return Ok(());
    }
    println!("{:<40} {}", "SELECTOR", "PROFILE KEY");
    println!("{}", "-".repeat(60));
    for (selector, key) in mappings.iter() {
        println!("{:<40} {}", selector, key);
    }
    Ok(())
}
