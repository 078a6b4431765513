use colored::Colorize;
use std::path::{Path, PathBuf};

/// Does the working copy sit on the declared content?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// HEAD and the declared reference resolve to the same commit
    Ok,
    /// Both sides resolve (or the declared one doesn't), and they differ
    ModelModified,
    /// The working copy directory is missing
    Error,
    /// No current commit could be determined, or the directory isn't a git repo
    Unknown,
}

/// Are tracked files modified? Independent of [`SyncState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanState {
    Ok,
    Dirty,
    /// Not evaluated
    Unknown,
}

impl SyncState {
    pub fn symbol(&self) -> char {
        match self {
            SyncState::Ok => ' ',
            SyncState::ModelModified => 's',
            SyncState::Error => '!',
            SyncState::Unknown => '?',
        }
    }
}

impl CleanState {
    pub fn symbol(&self) -> char {
        match self {
            CleanState::Ok => ' ',
            CleanState::Dirty => 'M',
            CleanState::Unknown => '-',
        }
    }
}

/// Status report for a single external.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalStatus {
    pub path: PathBuf,
    pub sync_state: SyncState,
    pub clean_state: CleanState,
    /// Name of what is checked out, for display only
    pub current_version: String,
    /// Name of what was declared, for display only
    pub expected_version: String,
    /// Full `git status` text for the user to inspect
    pub status_output: String,
}

impl ExternalStatus {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            sync_state: SyncState::Unknown,
            clean_state: CleanState::Unknown,
            current_version: String::new(),
            expected_version: String::new(),
            status_output: String::new(),
        }
    }

    /// One status line, `s` + `M` codes then the path; `verbose` appends
    /// `current --> expected`. Codes are colored when color output is enabled.
    pub fn render(&self, verbose: bool) -> String {
        let sync = self.sync_state.symbol().to_string();
        let sync = match self.sync_state {
            SyncState::Ok => sync.normal(),
            SyncState::ModelModified => sync.yellow().bold(),
            SyncState::Error => sync.red().bold(),
            SyncState::Unknown => sync.magenta(),
        };
        let clean = self.clean_state.symbol().to_string();
        let clean = match self.clean_state {
            CleanState::Dirty => clean.red().bold(),
            CleanState::Ok | CleanState::Unknown => clean.normal(),
        };

        let mut line = format!("{}{} {}", sync, clean, self.path.display());
        if verbose {
            line.push_str(&format!(
                " {} --> {}",
                display_version(&self.current_version),
                display_version(&self.expected_version)
            ));
        }
        line
    }
}

fn display_version(version: &str) -> &str {
    if version.is_empty() { "<none>" } else { version }
}
