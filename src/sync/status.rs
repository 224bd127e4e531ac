use crate::config::Descriptor;

/// Outcome of one pipeline step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepOutcome {
    /// The step's mode disabled it, or an earlier step stopped the pipeline
    #[default]
    NotAttempted,
    Succeeded,
    /// Diagnostic text reported by the operation
    Failed(String),
}

impl StepOutcome {
    pub fn is_attempted(&self) -> bool {
        !matches!(self, StepOutcome::NotAttempted)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            StepOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Pipeline steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pull,
    Stage,
    Commit,
    Push,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Step::Pull => "pull",
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Push => "push",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    AllClear,
    AttentionNeeded,
}

impl Health {
    /// All-clear when every repository in the run is
    pub fn of_run(statuses: &[Status<'_>]) -> Health {
        if statuses
            .iter()
            .all(|status| status.health() == Health::AllClear)
        {
            Health::AllClear
        } else {
            Health::AttentionNeeded
        }
    }
}

/// Result of syncing one repository.
///
/// Only the sync engine fills it in; once `sync_repo` returns it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status<'a> {
    pub(super) repository: &'a Descriptor,
    pub(super) pull: StepOutcome,
    pub(super) stage: StepOutcome,
    pub(super) commit: StepOutcome,
    pub(super) push: StepOutcome,
    pub(super) dirty: Option<bool>,
}

impl<'a> Status<'a> {
    pub(super) fn new(repository: &'a Descriptor) -> Self {
        Self {
            repository,
            pull: StepOutcome::NotAttempted,
            stage: StepOutcome::NotAttempted,
            commit: StepOutcome::NotAttempted,
            push: StepOutcome::NotAttempted,
            dirty: None,
        }
    }

    pub fn repository(&self) -> &'a Descriptor {
        self.repository
    }

    pub fn pull(&self) -> &StepOutcome {
        &self.pull
    }

    pub fn stage(&self) -> &StepOutcome {
        &self.stage
    }

    pub fn commit(&self) -> &StepOutcome {
        &self.commit
    }

    pub fn push(&self) -> &StepOutcome {
        &self.push
    }

    /// `None` when the pipeline stopped before the dirty check
    pub fn dirty(&self) -> Option<bool> {
        self.dirty
    }

    pub fn steps(&self) -> [(Step, &StepOutcome); 4] {
        [
            (Step::Pull, &self.pull),
            (Step::Stage, &self.stage),
            (Step::Commit, &self.commit),
            (Step::Push, &self.push),
        ]
    }

    /// Failed steps with their diagnostics, in pipeline order
    pub fn failures(&self) -> impl Iterator<Item = (Step, &str)> {
        self.steps()
            .into_iter()
            .filter_map(|(step, outcome)| outcome.failure().map(|message| (step, message)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Repository health: attempted pulls and pushes must have succeeded.
    /// Steps that never ran do not count against it.
    pub fn health(&self) -> Health {
        if self.pull.is_failed() || self.push.is_failed() {
            Health::AttentionNeeded
        } else {
            Health::AllClear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawRepoEntry, SyncRepo, load_entries};
    use crate::git::WorkingCopy;
    use std::path::Path;
    use tempfile::TempDir;

    struct Inert;

    impl WorkingCopy for Inert {
        fn remote_names(&self) -> anyhow::Result<Vec<String>> {
            Ok(vec!["origin".to_string()])
        }
        fn pull(&self, _remote: &str) -> anyhow::Result<()> {
            Ok(())
        }
        fn stage_tracked(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn stage_all(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn has_staged_changes(&self) -> anyhow::Result<bool> {
            Ok(false)
        }
        fn commit(&self, _message: &str) -> anyhow::Result<()> {
            Ok(())
        }
        fn push(&self, _remote: &str) -> anyhow::Result<()> {
            Ok(())
        }
        fn is_dirty(&self) -> bool {
            false
        }
    }

    fn descriptor(dir: &TempDir) -> SyncRepo<Inert> {
        let raw = RawRepoEntry {
            path: Some(dir.path().display().to_string()),
            ..Default::default()
        };
        load_entries(&[raw], Path::new("cfg"), |_: &str, _: &Path| Ok(Inert))
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_step_outcome_predicates() {
        assert!(!StepOutcome::NotAttempted.is_attempted());
        assert!(StepOutcome::Succeeded.is_attempted());
        assert!(!StepOutcome::Succeeded.is_failed());

        let failed = StepOutcome::Failed("boom".to_string());
        assert!(failed.is_attempted());
        assert!(failed.is_failed());
        assert_eq!(failed.failure(), Some("boom"));
        assert_eq!(StepOutcome::Succeeded.failure(), None);
    }

    #[test]
    fn test_fresh_status_is_healthy_and_unchecked() {
        let dir = TempDir::new().unwrap();
        let repo = descriptor(&dir);
        let status = Status::new(repo.descriptor());

        assert!(status.steps().iter().all(|(_, outcome)| !outcome.is_attempted()));
        assert_eq!(status.dirty(), None);
        assert_eq!(status.health(), Health::AllClear);
        assert!(!status.has_failures());
    }

    #[test]
    fn test_only_pull_and_push_affect_health() {
        let dir = TempDir::new().unwrap();
        let repo = descriptor(&dir);

        let mut status = Status::new(repo.descriptor());
        status.stage = StepOutcome::Failed("index locked".to_string());
        assert_eq!(status.health(), Health::AllClear);
        assert!(status.has_failures());

        status.push = StepOutcome::Failed("rejected".to_string());
        assert_eq!(status.health(), Health::AttentionNeeded);
        assert_eq!(
            status.failures().collect::<Vec<_>>(),
            vec![(Step::Stage, "index locked"), (Step::Push, "rejected")]
        );
    }

    #[test]
    fn test_run_health() {
        let dir = TempDir::new().unwrap();
        let repo = descriptor(&dir);

        let untouched = Status::new(repo.descriptor());
        let mut pulled = Status::new(repo.descriptor());
        pulled.pull = StepOutcome::Succeeded;
        assert_eq!(
            Health::of_run(&[untouched.clone(), pulled.clone()]),
            Health::AllClear
        );
        assert_eq!(Health::of_run(&[]), Health::AllClear);

        let mut failed = Status::new(repo.descriptor());
        failed.pull = StepOutcome::Failed("connection refused".to_string());
        assert_eq!(
            Health::of_run(&[untouched, failed, pulled]),
            Health::AttentionNeeded
        );
    }
}
