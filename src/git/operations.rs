use anyhow::{Context, Result};
use git2::{ErrorCode, IndexAddOption, StatusOptions, Tree};
use super::GitRepo;

impl GitRepo {
    pub fn list_remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes().context("Failed to list remotes")?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    /// Stage modifications and deletions of files already in the index
    pub fn update_tracked(&self) -> Result<()> {
        let mut index = self.repo.index().context("Failed to open index")?;
        // A pull through the git binary may have rewritten the index on disk
        index.read(false).context("Failed to read index")?;
        index
            .update_all(["*"].iter(), None)
            .context("Failed to stage tracked files")?;
        index.write().context("Failed to write index")?;
        Ok(())
    }

    /// Stage new, modified and deleted files, honouring `.gitignore`
    pub fn add_everything(&self) -> Result<()> {
        let mut index = self.repo.index().context("Failed to open index")?;
        index.read(false).context("Failed to read index")?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .context("Failed to stage files")?;
        // add_all does not drop entries for files removed from the working tree
        index
            .update_all(["*"].iter(), None)
            .context("Failed to stage deleted files")?;
        index.write().context("Failed to write index")?;
        Ok(())
    }

    /// Tree of the current HEAD commit, or `None` on an unborn branch
    pub(super) fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(
                head.peel_to_tree().context("Failed to resolve HEAD tree")?,
            )),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to get HEAD reference"),
        }
    }

    pub fn index_differs_from_head(&self) -> Result<bool> {
        let mut index = self.repo.index().context("Failed to open index")?;
        index.read(false).context("Failed to read index")?;
        let head_tree = self.head_tree()?;

        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
            .context("Failed to compare index with HEAD")?;

        Ok(diff.deltas().len() > 0)
    }

    /// Check for anything not yet committed, untracked files included
    pub fn has_uncommitted_files(&self) -> Result<bool> {
        let mut status_opts = StatusOptions::new();
        status_opts.include_ignored(false);
        status_opts.include_untracked(true);
        status_opts.recurse_untracked_dirs(false);

        let statuses = self
            .repo
            .statuses(Some(&mut status_opts))
            .context("Failed to get repository status")?;

        Ok(!statuses.is_empty())
    }
}
