//! The per-repository sync pipeline
//!
//! Steps run in a fixed order: pull, stage, commit, push, then the dirty
//! check. The first failing step ends the pipeline for that repository; the
//! outcomes of steps already run are kept. Repositories are processed one at
//! a time and a failure in one never affects the next.

pub mod status;

use anyhow::Result;

use crate::config::{PullMode, PushMode, StageMode, SyncRepo};
use crate::git::WorkingCopy;
use crate::git::commit::local_sync_message;
pub use status::{Health, Status, Step, StepOutcome};

pub struct SyncEngine {
    commit_message: String,
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncEngine {
    /// Engine whose commits name the local host
    pub fn new() -> Self {
        Self::with_commit_message(local_sync_message())
    }

    pub fn with_commit_message(message: impl Into<String>) -> Self {
        Self {
            commit_message: message.into(),
        }
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    /// Sync every repository in order, one status per repository
    pub fn run<'a, R: WorkingCopy>(&self, repos: &'a [SyncRepo<R>]) -> Vec<Status<'a>> {
        repos.iter().map(|repo| self.sync_repo(repo)).collect()
    }

    /// Run the pipeline for one repository
    pub fn sync_repo<'a, R: WorkingCopy>(&self, repo: &'a SyncRepo<R>) -> Status<'a> {
        let descriptor = repo.descriptor();
        let handle = repo.handle();
        let span = tracing::info_span!("sync", repo = descriptor.name());
        let _enter = span.enter();

        let mut status = Status::new(descriptor);

        if descriptor.pull() == PullMode::All {
            status.pull = attempt(Step::Pull, || handle.pull(descriptor.remote()));
            if status.pull.is_failed() {
                return status;
            }
        }

        status.stage = match descriptor.stage() {
            StageMode::Tracked => attempt(Step::Stage, || handle.stage_tracked()),
            StageMode::All => attempt(Step::Stage, || handle.stage_all()),
            StageMode::None => StepOutcome::NotAttempted,
        };
        if status.stage.is_failed() {
            return status;
        }

        if descriptor.push() == PushMode::All {
            match handle.has_staged_changes() {
                Ok(true) => {
                    status.commit =
                        attempt(Step::Commit, || handle.commit(&self.commit_message));
                    if status.commit.is_failed() {
                        return status;
                    }
                }
                Ok(false) => tracing::debug!("Nothing staged, no commit needed"),
                Err(e) => {
                    status.commit = failed(Step::Commit, &e);
                    return status;
                }
            }
        }

        if descriptor.push() != PushMode::None {
            status.push = attempt(Step::Push, || handle.push(descriptor.remote()));
            if status.push.is_failed() {
                return status;
            }
        }

        let dirty = handle.is_dirty();
        tracing::debug!("Working copy dirty: {}", dirty);
        status.dirty = Some(dirty);
        status
    }
}

fn attempt(step: Step, operation: impl FnOnce() -> Result<()>) -> StepOutcome {
    tracing::debug!("Starting {}", step.label());
    match operation() {
        Ok(()) => {
            tracing::info!("{} succeeded", step.label());
            StepOutcome::Succeeded
        }
        Err(e) => failed(step, &e),
    }
}

fn failed(step: Step, error: &anyhow::Error) -> StepOutcome {
    let message = format!("{error:#}");
    tracing::warn!("{} failed: {}", step.label(), message);
    StepOutcome::Failed(message)
}
