//! Per-repository policy options
//!
//! Each option is parsed from its configuration string exactly once, at load
//! time. Matching ignores case and surrounding whitespace.

use std::fmt;
use std::str::FromStr;

/// The value given for a mode option is not one of its legal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

/// Whether to pull from the configured remote before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullMode {
    All,
    #[default]
    None,
}

/// Which working-copy changes get staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageMode {
    /// Everything, including untracked files not covered by `.gitignore`
    All,
    /// Modifications and deletions of files git already knows about
    Tracked,
    #[default]
    None,
}

/// What gets pushed to the configured remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushMode {
    /// Commit whatever is staged, then push
    All,
    /// Push existing commits only
    Committed,
    #[default]
    None,
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

impl FromStr for PullMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            _ => Err(UnknownMode(value.to_string())),
        }
    }
}

impl FromStr for StageMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "all" => Ok(Self::All),
            "tracked" => Ok(Self::Tracked),
            "none" => Ok(Self::None),
            _ => Err(UnknownMode(value.to_string())),
        }
    }
}

impl FromStr for PushMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "all" => Ok(Self::All),
            "committed" => Ok(Self::Committed),
            "none" => Ok(Self::None),
            _ => Err(UnknownMode(value.to_string())),
        }
    }
}

impl fmt::Display for PullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::None => "none",
        })
    }
}

impl fmt::Display for StageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Tracked => "tracked",
            Self::None => "none",
        })
    }
}

impl fmt::Display for PushMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Committed => "committed",
            Self::None => "none",
        })
    }
}
