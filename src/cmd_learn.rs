//! `learn` subcommand.

use std::path::Path;
use std::sync::Arc;

use formfill_core::{Command, Outcome};
use formfill_dom::Document;
use formfill_protocols::{FillError, Page};

use crate::engine::{run_to_completion, Engine};

/// Capture the element matching `target` on `page` and bind it to `key`.
pub(crate) async fn handle_learn(
    engine: &Engine,
    page: &Path,
    target: &str,
    key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(page).await?;
    let document = Arc::new(Document::parse(&html));
    let element = document
        .query_selector(target)?
        .ok_or_else(|| FillError::NoElementForSelector(target.to_string()))?;

    let dispatcher = engine.dispatcher(document);
    dispatcher.capture().capture(element);

    let command = Command::Learn {
        profile_key: key.to_string(),
    };
    match run_to_completion(&dispatcher, command).await? {
        Outcome::Learned(mapping) => {
            println!(
                "Learned: {} -> {}",
                mapping.selector, mapping.profile_key
            );
            Ok(())
        }
        _ => Err("learn finished without a mapping".into()),
    }
}
