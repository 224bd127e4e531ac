//! Git integration layer for gitsync
//!
//! The sync pipeline only talks to the [`WorkingCopy`] trait. [`GitRepo`] is
//! the real implementation: local index and status work goes through git2,
//! network operations go through the system `git` binary so that the user's
//! credential helpers and SSH setup apply unchanged.

pub mod commit;
pub mod operations;
pub mod remote;

use anyhow::Result;
use git2::{ErrorClass, Repository};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Capabilities the sync pipeline needs from a working copy.
///
/// Fallible operations report their diagnostic through the error; the
/// pipeline records it verbatim and never looks further into it.
pub trait WorkingCopy {
    /// Names of the remotes configured for this repository
    fn remote_names(&self) -> Result<Vec<String>>;

    fn pull(&self, remote: &str) -> Result<()>;

    /// Stage modifications and deletions of tracked files only
    fn stage_tracked(&self) -> Result<()>;

    /// Stage everything, including new files not ignored by `.gitignore`
    fn stage_all(&self) -> Result<()>;

    /// Whether the index differs from the last commit
    fn has_staged_changes(&self) -> Result<bool>;

    fn commit(&self, message: &str) -> Result<()>;

    fn push(&self, remote: &str) -> Result<()>;

    /// Uncommitted modifications or untracked files are present
    fn is_dirty(&self) -> bool;
}

/// Why a path could not be opened as a working copy.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("{0}")]
    Unreadable(String),
    #[error("not a git repository")]
    NotARepository,
    #[error("bare repository")]
    Bare,
}

pub struct GitRepo {
    pub repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`.
    ///
    /// Parent directories are not searched: a path inside a working copy is
    /// not itself a working copy.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenError> {
        let repo = Repository::open(path.as_ref()).map_err(|e| match e.class() {
            ErrorClass::Repository => OpenError::NotARepository,
            _ => OpenError::Unreadable(e.message().to_string()),
        })?;

        let workdir = repo.workdir().ok_or(OpenError::Bare)?.to_path_buf();

        Ok(GitRepo { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl WorkingCopy for GitRepo {
    fn remote_names(&self) -> Result<Vec<String>> {
        self.list_remotes()
    }

    fn pull(&self, remote: &str) -> Result<()> {
        self.pull_from(remote)
    }

    fn stage_tracked(&self) -> Result<()> {
        self.update_tracked()
    }

    fn stage_all(&self) -> Result<()> {
        self.add_everything()
    }

    fn has_staged_changes(&self) -> Result<bool> {
        self.index_differs_from_head()
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.commit_index(message).map(|_| ())
    }

    fn push(&self, remote: &str) -> Result<()> {
        self.push_to(remote)
    }

    fn is_dirty(&self) -> bool {
        match self.has_uncommitted_files() {
            Ok(dirty) => dirty,
            Err(e) => {
                // Reported as dirty so the menu still draws attention to it
                tracing::warn!("Could not read status of {}: {e:#}", self.workdir.display());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_plain_directory_is_not_a_repository() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            GitRepo::open(dir.path()),
            Err(OpenError::NotARepository)
        ));
    }

    #[test]
    fn test_open_bare_repository_is_rejected() {
        let dir = TempDir::new().unwrap();
        Repository::init_bare(dir.path()).unwrap();
        assert!(matches!(GitRepo::open(dir.path()), Err(OpenError::Bare)));
    }

    #[test]
    fn test_open_dangling_gitdir_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("moved-away.git");
        std::fs::write(
            dir.path().join(".git"),
            format!("gitdir: {}\n", missing.display()),
        )
        .unwrap();

        match GitRepo::open(dir.path()) {
            Err(OpenError::Unreadable(message)) => assert!(!message.is_empty()),
            Err(other) => panic!("expected an unreadable repository, got {other:?}"),
            Ok(_) => panic!("a dangling gitdir must not open"),
        }
    }

    #[test]
    fn test_open_subdirectory_of_repository_is_rejected() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        assert!(GitRepo::open(dir.path()).is_ok());
        assert!(matches!(
            GitRepo::open(&nested),
            Err(OpenError::NotARepository)
        ));
    }
}
