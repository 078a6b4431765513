use crate::areas::git::Git;
use crate::areas::repository::ExternalRepository;
use crate::artifacts::declaration::repository_declaration::{
    DeclaredRef, RemoteUrl, RepositoryDeclaration,
};
use crate::artifacts::head::head_state::HeadState;
use crate::artifacts::remote::UNKNOWN_REMOTE;
use crate::artifacts::remote::remote_binding::RemoteBinding;
use crate::artifacts::status::external_status::{CleanState, ExternalStatus, SyncState};
use crate::errors::Result;
use tracing::debug;

impl ExternalRepository<'_> {
    /// Report whether the working copy is on the declared content and whether
    /// its tracked files are modified. Nothing is changed on disk.
    pub fn status(&self) -> Result<ExternalStatus> {
        let working_copy = self.working_copy();
        let mut status = ExternalStatus::new(working_copy.path());

        if !working_copy.exists() {
            status.sync_state = SyncState::Error;
            return Ok(status);
        }
        if !working_copy.has_metadata() {
            status.sync_state = SyncState::Unknown;
            return Ok(status);
        }

        let git = self.git();
        self.evaluate_sync(&git, &mut status)?;
        evaluate_cleanliness(&git, &mut status)?;

        debug!(
            component = self.declaration().component(),
            sync = ?status.sync_state,
            clean = ?status.clean_state,
            "status evaluated"
        );
        Ok(status)
    }

    fn evaluate_sync(&self, git: &Git, status: &mut ExternalStatus) -> Result<()> {
        let head = HeadState::parse(&git.branch_vv()?)
            .map_err(|err| err.for_component(self.declaration().component()))?;
        status.current_version = head
            .as_ref()
            .map(|head| head.current_ref().to_string())
            .unwrap_or_default();

        let remote_branch = self.declaration().target().is_branch()
            && matches!(self.declaration().url(), RemoteUrl::Url(_));
        let bindings = if remote_branch {
            RemoteBinding::parse_remote_verbose(&git.remote_verbose()?)
        } else {
            Vec::new()
        };
        let expected = expected_key(self.declaration(), &bindings);
        status.expected_version = expected.clone();

        let Some(current_hash) = git.log_hash()? else {
            status.sync_state = SyncState::Unknown;
            return Ok(());
        };

        status.sync_state = match git.rev_parse_commit(&expected)? {
            Some(expected_hash) if expected_hash == current_hash => SyncState::Ok,
            _ => SyncState::ModelModified,
        };
        Ok(())
    }
}

fn evaluate_cleanliness(git: &Git, status: &mut ExternalStatus) -> Result<()> {
    let porcelain = git.status_porcelain_v1z()?;
    status.clean_state = if porcelain.is_empty() {
        CleanState::Ok
    } else {
        CleanState::Dirty
    };
    status.status_output = git.status_verbose()?;
    Ok(())
}

/// The reference the working copy should resolve to.
///
/// Branches from a remote are qualified by the name of the remote bound to the
/// declared url; everything else is used as declared.
pub fn expected_key(declaration: &RepositoryDeclaration, bindings: &[RemoteBinding]) -> String {
    match (declaration.url(), declaration.target()) {
        (RemoteUrl::Url(url), DeclaredRef::Branch(branch)) => {
            let remote = RemoteBinding::find_by_url(bindings, url)
                .map(RemoteBinding::name)
                .unwrap_or(UNKNOWN_REMOTE);
            format!("{}/{}", remote, branch)
        }
        (_, target) => target.name().to_string(),
    }
}
