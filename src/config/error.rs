use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the configuration from loading.
///
/// Every variant is fatal for the whole run: a configuration with one bad
/// entry never syncs the remaining ones.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("Configuration file {} could not be parsed: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("No repositories listed to sync found in {}", .0.display())]
    NoRepositories(PathBuf),

    #[error("Duplicate repository name {0}")]
    DuplicateName(String),

    #[error("path required for {0}")]
    PathRequired(String),

    #[error("Path {} in {name} is not a directory", path.display())]
    NotADirectory { name: String, path: PathBuf },

    #[error("Path {} in {name} cannot be read: {message}", path.display())]
    Unreadable {
        name: String,
        path: PathBuf,
        message: String,
    },

    #[error("Path {} in {name} does not refer to a valid git repository", path.display())]
    NotARepository { name: String, path: PathBuf },

    #[error("Path {} in {name} is a bare repository without a working copy", path.display())]
    BareRepository { name: String, path: PathBuf },

    #[error("Remotes of repository {name} cannot be listed: {message}")]
    RemoteLookup { name: String, message: String },

    #[error("Remote {remote} does not exist for repository {name}")]
    UnknownRemote { name: String, remote: String },

    #[error("Invalid {option} mode \"{value}\" for repository {name}")]
    InvalidMode {
        name: String,
        option: &'static str,
        value: String,
    },
}
