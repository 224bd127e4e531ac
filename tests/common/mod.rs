//! Real repositories for integration tests: a bare "origin" and clones of it.

#![allow(dead_code)]

use git2::Repository;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run system git in `dir`, panicking with its stderr on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "fixture")
        .env("GIT_AUTHOR_EMAIL", "fixture@example.com")
        .env("GIT_COMMITTER_NAME", "fixture")
        .env("GIT_COMMITTER_EMAIL", "fixture@example.com")
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub struct Fixture {
    pub dir: TempDir,
    pub origin: PathBuf,
}

impl Fixture {
    /// Bare origin on branch `main` holding one commit with `README.md`
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let origin = dir.path().join("origin.git");
        fs::create_dir(&origin).unwrap();
        git(&origin, &["init", "--quiet", "--bare"]);
        git(&origin, &["symbolic-ref", "HEAD", "refs/heads/main"]);

        let seed = dir.path().join("seed");
        fs::create_dir(&seed).unwrap();
        git(&seed, &["init", "--quiet"]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        fs::write(seed.join("README.md"), "# notes\n").unwrap();
        git(&seed, &["add", "README.md"]);
        git(&seed, &["commit", "--quiet", "-m", "initial commit"]);
        git(&seed, &["remote", "add", "origin", origin.to_str().unwrap()]);
        git(&seed, &["push", "--quiet", "origin", "main"]);

        Fixture { dir, origin }
    }

    /// Fresh clone of origin named `name`, with a commit identity configured
    pub fn clone(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        git(
            self.dir.path(),
            &["clone", "--quiet", self.origin.to_str().unwrap(), name],
        );
        git(&path, &["config", "user.name", "gitsync test"]);
        git(&path, &["config", "user.email", "gitsync@example.com"]);
        path
    }

    /// Commit id `main` points at in origin
    pub fn origin_head(&self) -> String {
        git(&self.origin, &["rev-parse", "refs/heads/main"])
    }

    /// Write a configuration file listing `body` verbatim
    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self.dir.path().join("gitsync.toml");
        fs::write(&path, body).unwrap();
        path
    }
}

pub fn head_of(path: &Path) -> String {
    git(path, &["rev-parse", "HEAD"])
}

pub fn head_message(path: &Path) -> String {
    let repo = Repository::open(path).unwrap();
    let commit = repo.head().unwrap().peel_to_commit().unwrap();
    commit.message().unwrap_or_default().to_string()
}

/// TOML string literal for a path
pub fn toml_path(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}
