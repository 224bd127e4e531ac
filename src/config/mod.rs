//! Configuration management for gitsync
//!
//! The configuration file lists the working copies to sync. Loading is
//! all-or-nothing: every entry is resolved, opened and validated before any
//! of them is handed to the sync engine, and the first invalid entry aborts
//! the whole load.

pub mod error;
pub mod format;
pub mod modes;

use figment::Figment;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::git::{GitRepo, OpenError, WorkingCopy};
pub use error::ConfigError;
pub use modes::{PullMode, PushMode, StageMode};

/// File name of the configuration in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".gitsync.toml";

/// Remote used when an entry does not name one
pub const DEFAULT_REMOTE: &str = "origin";

/// Location of the configuration file when none is given explicitly
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(CONFIG_FILE_NAME)
}

/// Configuration file as written by the user, before any validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub repos: Vec<RawRepoEntry>,
}

/// One `[[repos]]` entry as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepoEntry {
    pub name: Option<String>,
    pub path: Option<String>,
    pub remote: Option<String>,
    pub pull: Option<String>,
    pub stage: Option<String>,
    pub push: Option<String>,
    pub command: Option<String>,
}

/// A validated repository entry. Only [`validate`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    path: PathBuf,
    remote: String,
    pull: PullMode,
    stage: StageMode,
    push: PushMode,
    post_command: Option<String>,
}

impl Descriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn pull(&self) -> PullMode {
        self.pull
    }

    pub fn stage(&self) -> StageMode {
        self.stage
    }

    pub fn push(&self) -> PushMode {
        self.push
    }

    /// Shell command offered in the menu for this repository. Never run by gitsync.
    pub fn post_command(&self) -> Option<&str> {
        self.post_command.as_deref()
    }
}

/// A descriptor together with the working copy it was validated against
#[derive(Debug)]
pub struct SyncRepo<R> {
    descriptor: Descriptor,
    handle: R,
}

impl<R: WorkingCopy> SyncRepo<R> {
    pub fn new(descriptor: Descriptor, handle: R) -> Self {
        Self { descriptor, handle }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn handle(&self) -> &R {
        &self.handle
    }
}

/// Check the options of one entry against its opened working copy.
///
/// The remote must be one the repository actually has; the modes must be
/// legal values of their option.
pub fn validate<R: WorkingCopy>(
    raw: &RawRepoEntry,
    name: &str,
    path: &Path,
    handle: &R,
) -> Result<Descriptor, ConfigError> {
    let remote = raw
        .remote
        .as_deref()
        .map(str::trim)
        .unwrap_or(DEFAULT_REMOTE)
        .to_string();

    let remotes = handle
        .remote_names()
        .map_err(|e| ConfigError::RemoteLookup {
            name: name.to_string(),
            message: format!("{e:#}"),
        })?;
    if !remotes.contains(&remote) {
        return Err(ConfigError::UnknownRemote {
            name: name.to_string(),
            remote,
        });
    }

    Ok(Descriptor {
        name: name.to_string(),
        path: path.to_path_buf(),
        remote,
        pull: parse_mode(raw.pull.as_deref(), "pull", name)?,
        stage: parse_mode(raw.stage.as_deref(), "stage", name)?,
        push: parse_mode(raw.push.as_deref(), "push", name)?,
        post_command: raw
            .command
            .as_ref()
            .filter(|command| !command.trim().is_empty())
            .cloned(),
    })
}

fn parse_mode<M>(value: Option<&str>, option: &'static str, name: &str) -> Result<M, ConfigError>
where
    M: std::str::FromStr<Err = modes::UnknownMode> + Default,
{
    match value {
        None => Ok(M::default()),
        Some(value) => value.parse().map_err(|modes::UnknownMode(value)| {
            ConfigError::InvalidMode {
                name: name.to_string(),
                option,
                value,
            }
        }),
    }
}

/// Read the configuration file without validating its entries
pub fn read_raw(config_path: &Path) -> Result<RawConfig, ConfigError> {
    if !config_path.is_file() {
        return Err(ConfigError::MissingFile(config_path.to_path_buf()));
    }

    Figment::from(format::provider(config_path))
        .extract::<RawConfig>()
        .map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Load and validate every entry of the configuration at `config_path`
pub fn load(config_path: &Path) -> Result<Vec<SyncRepo<GitRepo>>, ConfigError> {
    let raw = read_raw(config_path)?;
    tracing::debug!(
        "Read {} repository entries from {}",
        raw.repos.len(),
        config_path.display()
    );
    load_entries(&raw.repos, config_path, open_git_repo)
}

fn open_git_repo(name: &str, path: &Path) -> Result<GitRepo, ConfigError> {
    GitRepo::open(path).map_err(|e| match e {
        OpenError::NotARepository => ConfigError::NotARepository {
            name: name.to_string(),
            path: path.to_path_buf(),
        },
        OpenError::Bare => ConfigError::BareRepository {
            name: name.to_string(),
            path: path.to_path_buf(),
        },
        OpenError::Unreadable(message) => ConfigError::Unreadable {
            name: name.to_string(),
            path: path.to_path_buf(),
            message,
        },
    })
}

/// Resolve, open and validate `entries` in order, stopping at the first error.
///
/// `open` turns an existing directory into a working copy handle; it is a
/// parameter so the rules can be exercised without real repositories.
pub fn load_entries<R, F>(
    entries: &[RawRepoEntry],
    config_path: &Path,
    open: F,
) -> Result<Vec<SyncRepo<R>>, ConfigError>
where
    R: WorkingCopy,
    F: Fn(&str, &Path) -> Result<R, ConfigError>,
{
    if entries.is_empty() {
        return Err(ConfigError::NoRepositories(config_path.to_path_buf()));
    }

    let mut names = HashSet::new();
    let mut repos = Vec::with_capacity(entries.len());

    for (position, raw) in entries.iter().enumerate() {
        let label = raw
            .name
            .clone()
            .unwrap_or_else(|| format!("entry {}", position + 1));

        let path = match raw.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => expand_home(path),
            _ => return Err(ConfigError::PathRequired(label)),
        };
        let name = raw.name.clone().unwrap_or_else(|| name_from_path(&path));

        if !names.insert(name.clone()) {
            return Err(ConfigError::DuplicateName(name));
        }

        if !path.is_dir() {
            return Err(ConfigError::NotADirectory { name, path });
        }

        let handle = open(&name, &path)?;
        let descriptor = validate(raw, &name, &path, &handle)?;
        tracing::debug!(
            "Loaded {}: remote={} pull={} stage={} push={}",
            descriptor.name(),
            descriptor.remote(),
            descriptor.pull(),
            descriptor.stage(),
            descriptor.push()
        );
        repos.push(SyncRepo::new(descriptor, handle));
    }

    Ok(repos)
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

fn name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
