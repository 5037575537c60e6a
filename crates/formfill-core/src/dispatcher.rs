//! Two-step command handling.
//!
//! A command is first accepted or rejected. An accepted command runs on its
//! own task and reports through the returned [`Completion`], so callers can
//! tell "request accepted" apart from "fill finished".

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use formfill_protocols::{FillError, Profile};

use crate::capture::TargetCapture;
use crate::learning::{LearnedMapping, Learner};
use crate::orchestrator::FormFiller;
use crate::profile_store::ProfileStore;
use crate::report::FillReport;

/// A request from the invoking surface.
#[derive(Debug, Clone)]
pub enum Command {
    /// Fill the page from the supplied profile.
    Fill { profile: Box<Profile> },
    /// Fill the page from the stored profile.
    FillFromStore,
    /// Bind the captured element to `profile_key`.
    Learn { profile_key: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Fill { .. } => "fill",
            Command::FillFromStore => "fill-from-store",
            Command::Learn { .. } => "learn",
        }
    }
}

/// Final result of an accepted command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome {
    Filled(FillReport),
    Learned(LearnedMapping),
    Failed(FillError),
}

/// Handle to an accepted command's task.
pub struct Completion {
    inner: JoinHandle<Outcome>,
}

impl Completion {
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Wait for the command to finish.
    pub async fn wait(self) -> Outcome {
        match self.inner.await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed(FillError::Interrupted(e.to_string())),
        }
    }
}

/// Immediate answer to a command.
pub enum Acknowledgement {
    Accepted(Completion),
    Rejected(FillError),
}

impl Acknowledgement {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Acknowledgement::Accepted(_))
    }

    pub fn into_completion(self) -> Result<Completion, FillError> {
        match self {
            Acknowledgement::Accepted(completion) => Ok(completion),
            Acknowledgement::Rejected(err) => Err(err),
        }
    }
}

/// Routes commands to the fill and learning engines.
pub struct CommandDispatcher {
    filler: Arc<FormFiller>,
    learner: Arc<Learner>,
    profiles: Arc<ProfileStore>,
    capture: Arc<TargetCapture>,
}

impl CommandDispatcher {
    pub fn new(
        filler: Arc<FormFiller>,
        learner: Arc<Learner>,
        profiles: Arc<ProfileStore>,
        capture: Arc<TargetCapture>,
    ) -> Self {
        Self {
            filler,
            learner,
            profiles,
            capture,
        }
    }

    pub fn capture(&self) -> &Arc<TargetCapture> {
        &self.capture
    }

    /// Accept or reject `command`. Accepted commands are already running
    /// when this returns.
    pub async fn dispatch(&self, command: Command) -> Acknowledgement {
        info!("Received {} command", command.name());
        match command {
            Command::Fill { profile } => self.spawn_fill(*profile),
            Command::FillFromStore => match self.profiles.load().await {
                Ok(profile) => self.spawn_fill(profile),
                Err(e) => {
                    warn!("Fill rejected: {}", e);
                    Acknowledgement::Rejected(e)
                }
            },
            Command::Learn { profile_key } => {
                let Some(target) = self.capture.take() else {
                    warn!("Learn rejected: no element captured");
                    return Acknowledgement::Rejected(FillError::NoCapturedTarget);
                };
                let learner = self.learner.clone();
                Acknowledgement::Accepted(Completion {
                    inner: tokio::spawn(async move {
                        match learner.learn(target, &profile_key).await {
                            Ok(mapping) => Outcome::Learned(mapping),
                            Err(e) => Outcome::Failed(e),
                        }
                    }),
                })
            }
        }
    }

    fn spawn_fill(&self, profile: Profile) -> Acknowledgement {
        let filler = self.filler.clone();
        Acknowledgement::Accepted(Completion {
            inner: tokio::spawn(async move { Outcome::Filled(filler.fill(&profile).await) }),
        })
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
