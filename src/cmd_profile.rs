//! `profile` subcommand handlers.

use std::path::Path;

use formfill_protocols::Profile;

use crate::cli::ProfileAction;
use crate::engine::Engine;

pub(crate) async fn handle_profile_command(
    engine: &Engine,
    action: ProfileAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Import { file } => profile_import(engine, &file).await,
        ProfileAction::Show => {
            let profile = engine.profiles.load().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
    }
}

async fn profile_import(engine: &Engine, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = tokio::fs::read_to_string(file).await?;
    let profile: Profile = serde_json::from_str(&json)?;
    engine.profiles.save(&profile).await?;
    println!(
        "Profile imported ({} work, {} education entries).",
        profile.work_experience.len(),
        profile.education.len()
    );
    Ok(())
}
