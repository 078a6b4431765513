//! Error types
//!
//! Every repository-scoped variant names the component it belongs to, so a caller
//! processing many externals can report the failure and move on to the next one.

use crate::artifacts::reference::classification::TagVerdict;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExternalsError>;

/// Failure to run an external command at all (as opposed to the command
/// running and exiting nonzero, which the caller interprets).
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed while waiting for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

#[derive(Debug, Error)]
pub enum ExternalsError {
    #[error("In repo \"{component}\": none of branch, hash or tag are set")]
    MissingReference { component: String },

    #[error("In repo \"{component}\": only one of branch, hash or tag may be set, got {found}")]
    ConflictingReference { component: String, found: String },

    /// `unresolved` is the piece that could not be expanded: `$VAR`, `~` or `~user`
    #[error("In repo \"{component}\": cannot expand {unresolved} in local url \"{url}\"")]
    UnresolvedLocalUrl {
        component: String,
        url: String,
        unresolved: String,
    },

    #[error(
        "In repo \"{component}\": reference \"{reference}\" does not appear to be a valid tag, \
         branch or hash! Please verify the reference name (e.g. spelling), is available from: {url}"
    )]
    InvalidReference {
        component: String,
        reference: String,
        url: String,
    },

    #[error("In repo \"{component}\": reference \"{reference}\" {}", verdict.explanation())]
    RejectedReference {
        component: String,
        reference: String,
        verdict: TagVerdict,
    },

    #[error(
        "In repo \"{component}\": working copy {} does not exist and there is no remote url to clone from",
        path.display()
    )]
    NothingToClone { component: String, path: PathBuf },

    #[error(
        "In repo \"{component}\": {} exists but is not a git working copy",
        path.display()
    )]
    NotAWorkingCopy { component: String, path: PathBuf },

    #[error(
        "In repo \"{component}\": regex to detect {pattern} head state failed!\nref:\n{line}\ngit_output\n{output}"
    )]
    HeadState {
        /// Empty until the caller attaches it with [`ExternalsError::for_component`]
        component: String,
        pattern: &'static str,
        line: String,
        output: String,
    },

    #[error("`{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error("failed to prepare {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExternalsError {
    /// Attach the component to errors raised below the repository layer, where
    /// it isn't known.
    pub fn for_component(self, component: &str) -> Self {
        match self {
            ExternalsError::HeadState {
                pattern,
                line,
                output,
                ..
            } => ExternalsError::HeadState {
                component: component.to_string(),
                pattern,
                line,
                output,
            },
            other => other,
        }
    }
}
