use crate::areas::executor::CommandExecutor;
use crate::areas::git::Git;
use crate::areas::working_copy::WorkingCopy;
use crate::artifacts::declaration::repository_declaration::RepositoryDeclaration;
use derive_new::new;
use std::path::Path;

/// One external: what was declared for it and where its working copy lives.
///
/// The `checkout` and `status` operations are implemented on this type in
/// `crate::commands`.
#[derive(new)]
pub struct ExternalRepository<'e> {
    declaration: RepositoryDeclaration,
    working_copy: WorkingCopy,
    executor: &'e dyn CommandExecutor,
    git_program: &'e str,
}

impl<'e> ExternalRepository<'e> {
    pub fn declaration(&self) -> &RepositoryDeclaration {
        &self.declaration
    }

    pub fn working_copy(&self) -> &WorkingCopy {
        &self.working_copy
    }

    /// Git running inside the working copy.
    pub fn git(&self) -> Git<'e> {
        self.git_in(self.working_copy.path())
    }

    /// Git running inside an arbitrary directory, e.g. the parent a clone starts from.
    pub fn git_in(&self, dir: &Path) -> Git<'e> {
        Git::new(self.executor, self.git_program, dir)
    }
}
