//! # gitsync - keep git working copies in sync from the menu bar
//!
//! gitsync is meant to be run periodically as a BitBar/SwiftBar plugin. Each
//! run walks a list of local working copies and, per repository, performs
//! the configured subset of:
//!
//! 1. **pull** from a remote
//! 2. **stage** tracked or all changes
//! 3. **commit** what was staged (never an empty commit)
//! 4. **push** to the remote
//!
//! then reports whether each working copy is still dirty. The first failing
//! step ends the pipeline for that repository only; the report shows the
//! diagnostic underneath the repository's menu line.
//!
//! ## Configuration
//!
//! ```toml
//! # ~/.gitsync.toml
//! [[repos]]
//! path = "~/notes"
//! pull = "all"              # all | none
//! stage = "all"             # all | tracked | none
//! push = "all"              # all | committed | none
//! command = "open ~/notes"  # offered as a menu action, never run by gitsync
//!
//! [[repos]]
//! name = "dotfiles"
//! path = "~/.dotfiles"
//! remote = "github"
//! pull = "all"
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use gitsync::config;
//! use gitsync::report::{self, RunOutcome};
//! use gitsync::sync::SyncEngine;
//!
//! let repos = config::load(&config::default_config_path())?;
//! let statuses = SyncEngine::new().run(&repos);
//! print!("{}", report::render(&RunOutcome::Completed(statuses)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod report;
pub mod sync;

pub use cli::Cli;
pub use config::{ConfigError, Descriptor};
