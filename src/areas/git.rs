//! Git invocations
//!
//! One method per git command line the crate issues, with no decision logic in
//! them: they build the argv, run it through the executor and hand back either
//! the exit status (for existence probes), the output (for queries), or nothing
//! (for side effects, which fail loudly on a nonzero exit).

use crate::areas::executor::{CommandExecutor, ExecOutput, ExecRequest};
use crate::errors::{ExternalsError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Git bound to a single directory; every command it runs executes there.
pub struct Git<'e> {
    executor: &'e dyn CommandExecutor,
    program: &'e str,
    workdir: PathBuf,
}

impl<'e> Git<'e> {
    pub fn new(executor: &'e dyn CommandExecutor, program: &'e str, workdir: &Path) -> Self {
        Self {
            executor,
            program,
            workdir: workdir.to_path_buf(),
        }
    }

    fn execute(&self, args: &[&str]) -> Result<(ExecRequest, ExecOutput)> {
        let request = ExecRequest::new(self.program, self.workdir.as_path()).args(args.iter().copied());
        debug!(command = %request, cwd = %self.workdir.display(), "running git");

        let output = self.executor.execute(&request)?;
        debug!(
            command = %request,
            status = %output.status_label(),
            stdout = %output.stdout.trim_end(),
            stderr = %output.stderr.trim_end(),
            "git finished"
        );

        Ok((request, output))
    }

    /// Exit status as an answer: `true` on zero, `false` otherwise.
    fn probe(&self, args: &[&str]) -> Result<bool> {
        let (_, output) = self.execute(args)?;
        Ok(output.success())
    }

    /// Run for side effects; a nonzero exit is an error carrying stderr.
    fn run(&self, args: &[&str]) -> Result<ExecOutput> {
        let (request, output) = self.execute(args)?;

        if output.success() {
            Ok(output)
        } else {
            Err(ExternalsError::CommandFailed {
                command: request.to_string(),
                status: output.status_label(),
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Output of a query that is allowed to fail; failure yields empty output.
    fn query_lenient(&self, args: &[&str]) -> Result<String> {
        let (request, output) = self.execute(args)?;

        if !output.success() {
            warn!(command = %request, status = %output.status_label(), "git query failed, treating output as empty");
            return Ok(String::new());
        }

        Ok(output.stdout)
    }

    /// Full hash of the currently checked-out commit, `None` when there is none.
    pub fn log_hash(&self) -> Result<Option<String>> {
        let output = self.query_lenient(&["log", "-1", "--format=%H"])?;
        let hash = output.trim().trim_matches('"');

        Ok((!hash.is_empty()).then(|| hash.to_string()))
    }

    /// Verbose branch listing including upstream tracking and hashes.
    pub fn branch_vv(&self) -> Result<String> {
        self.query_lenient(&["branch", "--verbose", "--verbose"])
    }

    pub fn show_ref_tag(&self, reference: &str) -> Result<bool> {
        let tag = format!("refs/tags/{}", reference);
        self.probe(&["show-ref", "--quiet", "--verify", &tag])
    }

    pub fn show_ref_branch(&self, reference: &str) -> Result<bool> {
        let branch = format!("refs/heads/{}", reference);
        self.probe(&["show-ref", "--quiet", "--verify", &branch])
    }

    /// Ask the remote whether it has a branch by that name; needs the network.
    pub fn ls_remote_branch(&self, reference: &str, remote_name: &str) -> Result<bool> {
        self.probe(&["ls-remote", "--exit-code", "--heads", remote_name, reference])
    }

    /// Resolve a reference to the full hash of the commit it designates.
    pub fn rev_parse_commit(&self, reference: &str) -> Result<Option<String>> {
        let commit = format!("{}^{{commit}}", reference);
        let (_, output) = self.execute(&["rev-parse", "--quiet", "--verify", &commit])?;

        if output.success() {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// Machine-readable status of tracked files only.
    pub fn status_porcelain_v1z(&self) -> Result<String> {
        let output = self.run(&["status", "--untracked-files=no", "--porcelain", "-z"])?;
        Ok(output.stdout)
    }

    /// Human-readable status, informational only.
    pub fn status_verbose(&self) -> Result<String> {
        self.query_lenient(&["status"])
    }

    pub fn remote_verbose(&self) -> Result<String> {
        let output = self.run(&["remote", "--verbose"])?;
        Ok(output.stdout)
    }

    pub fn clone_repo(&self, url: &str, dir_name: &str) -> Result<()> {
        info!("    git clone {} {}", url, dir_name);
        self.run(&["clone", url, dir_name])?;
        Ok(())
    }

    pub fn remote_add(&self, name: &str, url: &str) -> Result<()> {
        self.run(&["remote", "add", name, url])?;
        Ok(())
    }

    pub fn fetch(&self, remote_name: &str) -> Result<()> {
        self.run(&["fetch", "--tags", remote_name])?;
        Ok(())
    }

    /// `reference` is either qualified (`origin/my_feature`) or bare (`tag1`).
    pub fn checkout(&self, reference: &str) -> Result<()> {
        info!("    git checkout {}", reference);
        self.run(&["checkout", reference])?;
        Ok(())
    }
}
