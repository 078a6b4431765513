use derive_new::new;
use std::path::{Path, PathBuf};

const METADATA_DIR: &str = ".git";

/// Where an external lives on disk.
///
/// The directory existing and it holding git metadata are separate facts: a
/// directory without `.git` is not a working copy, and git run inside it would
/// walk up and operate on whatever repository encloses it.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkingCopy {
    path: PathBuf,
}

impl WorkingCopy {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `.git` may be a directory or, for worktrees and submodules, a file.
    pub fn has_metadata(&self) -> bool {
        self.path.join(METADATA_DIR).exists()
    }

    /// Directory a clone has to be started from.
    pub fn parent(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Final path component, the name `git clone` is given.
    pub fn dir_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}
