//! Wiring of the fill engine from configuration.

use std::sync::Arc;

use tracing::debug;

use formfill_config::Config;
use formfill_core::{
    Acknowledgement, Command, CommandDispatcher, FormFiller, JsonFileStore, Learner,
    MappingStore, Outcome, ProfileStore, TargetCapture,
};
use formfill_protocols::{FillError, Page};

/// Storage adapters shared by every command.
pub(crate) struct Engine {
    pub mappings: Arc<MappingStore>,
    pub profiles: Arc<ProfileStore>,
    capture_ttl: std::time::Duration,
}

impl Engine {
    pub fn from_config(config: &Config) -> Self {
        let path = config.storage.resolved_path();
        debug!("Using storage file {}", path.display());
        let store = Arc::new(JsonFileStore::new(path));
        Self {
            mappings: Arc::new(MappingStore::with_record(
                store.clone(),
                config.storage.mappings_record.clone(),
            )),
            profiles: Arc::new(ProfileStore::with_record(
                store,
                config.storage.profile_record.clone(),
            )),
            capture_ttl: config.learning.capture_ttl(),
        }
    }

    /// A dispatcher bound to `page`.
    pub fn dispatcher(&self, page: Arc<dyn Page>) -> CommandDispatcher {
        CommandDispatcher::new(
            Arc::new(FormFiller::new(page.clone(), self.mappings.clone())),
            Arc::new(Learner::new(page, self.mappings.clone())),
            self.profiles.clone(),
            Arc::new(TargetCapture::new(self.capture_ttl)),
        )
    }
}

/// Dispatch `command` and wait for it, folding rejection and failure into `Err`.
pub(crate) async fn run_to_completion(
    dispatcher: &CommandDispatcher,
    command: Command,
) -> Result<Outcome, FillError> {
    match dispatcher.dispatch(command).await {
        Acknowledgement::Rejected(e) => Err(e),
        Acknowledgement::Accepted(completion) => match completion.wait().await {
            Outcome::Failed(e) => Err(e),
            outcome => Ok(outcome),
        },
    }
}
