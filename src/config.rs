use crate::areas::executor::SystemExecutor;
use std::time::Duration;

pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Process-wide settings, filled from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Program invoked for every git command
    pub git_program: String,
    /// Upper bound for a single git command; `None` waits indefinitely
    pub command_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
            command_timeout: None,
        }
    }
}

impl Settings {
    pub fn new(git_program: Option<String>, timeout_secs: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            git_program: git_program
                .filter(|program| !program.trim().is_empty())
                .unwrap_or(defaults.git_program),
            command_timeout: timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn executor(&self) -> SystemExecutor {
        SystemExecutor::new(self.command_timeout)
    }
}
