//! Commit creation
//!
//! Sync commits carry a fixed message naming the machine they were made on,
//! so a history touched from several hosts stays readable.

use anyhow::{Context, Result};
use git2::Oid;
use sysinfo::System;
use super::GitRepo;

/// Message used for every automatic commit made on `host`
pub fn sync_message(host: &str) -> String {
    format!("gitsync: automatic commit from {host}")
}

/// Commit message for this machine
pub fn local_sync_message() -> String {
    let host = System::host_name().unwrap_or_else(|| "unknown host".to_string());
    sync_message(&host)
}

impl GitRepo {
    /// Commit the current index on top of HEAD (or as the root commit)
    pub fn commit_index(&self, message: &str) -> Result<Oid> {
        let signature = self
            .repo
            .signature()
            .context("No commit identity configured (set user.name and user.email)")?;

        let mut index = self.repo.index().context("Failed to open index")?;
        index.read(false).context("Failed to read index")?;
        let tree_id = index.write_tree().context("Failed to write tree")?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.head_tree()? {
            Some(_) => Some(
                self.repo
                    .head()?
                    .peel_to_commit()
                    .context("Failed to resolve HEAD commit")?,
            ),
            None => None,
        };
        let parents: Vec<_> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .context("Failed to create commit")?;

        tracing::info!("Created commit {} in {}", oid, self.workdir().display());
        Ok(oid)
    }
}
