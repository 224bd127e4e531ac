use anyhow::{Context, Result, anyhow};
use std::process::Command;
use super::GitRepo;

impl GitRepo {
    /// Pull from `remote` into the current branch using system git
    pub fn pull_from(&self, remote: &str) -> Result<()> {
        tracing::debug!("Pulling {} from {}", self.workdir().display(), remote);
        self.run_git(&["pull", "--quiet", "--no-edit", remote])
    }

    /// Push the current branch to the same-named branch on `remote`
    pub fn push_to(&self, remote: &str) -> Result<()> {
        tracing::debug!("Pushing {} to {}", self.workdir().display(), remote);
        self.run_git(&["push", "--quiet", remote, "HEAD"])
    }

    /// Run git in the working copy. A failing command's stderr becomes the error.
    fn run_git(&self, args: &[&str]) -> Result<()> {
        let git = which::which("git").context("git executable not found on PATH")?;

        let output = Command::new(git)
            .args(args)
            .current_dir(self.workdir())
            // Never block a background run on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                return Err(anyhow!("git {} exited with {}", args[0], output.status));
            }
            return Err(anyhow!("{}", stderr));
        }

        tracing::trace!("git {} finished", args.join(" "));
        Ok(())
    }
}
