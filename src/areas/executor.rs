//! Command executor port
//!
//! Everything this crate learns about a working copy comes from running git and
//! reading its exit status and output. That capability sits behind the
//! [`CommandExecutor`] trait so tests can substitute a scripted fake.
//!
//! Requests always carry the directory the command must run in. The process-wide
//! current directory is never touched; the child gets its directory through
//! `Command::current_dir`.

use crate::errors::ExecError;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

pub trait CommandExecutor {
    /// Run the request to completion and hand back its exit status and raw output.
    ///
    /// A nonzero exit is not an error at this level; only failing to run the
    /// command at all is.
    fn execute(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl ExecRequest {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl fmt::Display for ExecRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

/// Runs requests as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    timeout: Option<Duration>,
}

impl SystemExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        let command = request.to_string();

        let mut child = Command::new(request.program())
            .args(request.arguments())
            .current_dir(request.cwd())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        // drain both pipes concurrently so a chatty child cannot block on a full pipe
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = match self.timeout {
            Some(timeout) => {
                let waited = child
                    .wait_timeout(timeout)
                    .map_err(|source| ExecError::Wait {
                        command: command.clone(),
                        source,
                    })?;
                match waited {
                    Some(status) => status,
                    None => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ExecError::Timeout { command, timeout });
                    }
                }
            }
            None => child.wait().map_err(|source| ExecError::Wait {
                command: command.clone(),
                source,
            })?,
        };

        let stdout = join_reader(stdout).map_err(|source| ExecError::Wait {
            command: command.clone(),
            source,
        })?;
        let stderr = join_reader(stderr).map_err(|source| ExecError::Wait {
            command: command.clone(),
            source,
        })?;

        Ok(ExecOutput {
            code: status.code(),
            stdout,
            stderr,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut stream: R) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

fn join_reader(handle: Option<JoinHandle<io::Result<String>>>) -> io::Result<String> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("output reader thread panicked"))?,
        None => Ok(String::new()),
    }
}
