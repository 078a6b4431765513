use crate::areas::git::Git;
use crate::artifacts::declaration::repository_declaration::{DeclaredRef, RepositoryDeclaration};
use crate::artifacts::reference::classification::{ReferenceClassification, TagVerdict};
use crate::errors::{ExecError, ExternalsError, Result};
use derive_new::new;
use tracing::{debug, warn};

/// Probes a working copy for the different things a reference string can be.
#[derive(new)]
pub struct ReferenceClassifier<'g, 'e> {
    git: &'g Git<'e>,
}

impl ReferenceClassifier<'_, '_> {
    pub fn is_tag(&self, reference: &str) -> Result<bool> {
        self.git.show_ref_tag(reference)
    }

    /// Local branch, or a branch on `remote_name` when one is given.
    ///
    /// The remote side needs the network. Any failure there, including a timeout,
    /// just means "not found".
    pub fn is_branch(&self, reference: &str, remote_name: Option<&str>) -> Result<bool> {
        if self.git.show_ref_branch(reference)? {
            return Ok(true);
        }
        let Some(remote_name) = remote_name else {
            return Ok(false);
        };

        match self.git.ls_remote_branch(reference, remote_name) {
            Ok(found) => Ok(found),
            Err(ExternalsError::Exec(ExecError::Timeout { command, timeout })) => {
                warn!(%command, ?timeout, "remote branch probe timed out, assuming not found");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// The reference names a commit whose full hash starts with the reference itself.
    ///
    /// `rev-parse` happily resolves tags, branches and tree ids; the prefix test
    /// keeps only actual hashes (and rejects ambiguous short prefixes, which
    /// rev-parse refuses to resolve).
    pub fn is_hash(&self, reference: &str) -> Result<bool> {
        let is_hash = self
            .git
            .rev_parse_commit(reference)?
            .is_some_and(|hash| hash.starts_with(&reference.to_ascii_lowercase()));

        Ok(is_hash)
    }

    pub fn classify(
        &self,
        reference: &str,
        remote_name: Option<&str>,
    ) -> Result<ReferenceClassification> {
        let classification = ReferenceClassification::new(
            self.is_tag(reference)?,
            self.is_branch(reference, remote_name)?,
            self.is_hash(reference)?,
        );
        debug!(reference, ?remote_name, ?classification, "classified reference");

        Ok(classification)
    }

    /// Check the declared reference before anything is checked out.
    ///
    /// Rejected: references that are none of tag, branch or hash; names that are
    /// both a tag and a branch, because which one git picks depends on its
    /// version; and declared tags that only exist as a branch.
    pub fn validate(
        &self,
        declaration: &RepositoryDeclaration,
        remote_name: Option<&str>,
    ) -> Result<ReferenceClassification> {
        let reference = declaration.target().name();
        let classification = self.classify(reference, remote_name)?;

        if !classification.is_valid() {
            return Err(ExternalsError::InvalidReference {
                component: declaration.component().to_string(),
                reference: reference.to_string(),
                url: declaration.url().to_string(),
            });
        }

        let verdict = classification.tag_verdict();
        let rejected = match verdict {
            TagVerdict::BothBranchAndTag => true,
            TagVerdict::BranchNotTag => matches!(declaration.target(), DeclaredRef::Tag(_)),
            _ => false,
        };

        if rejected {
            return Err(ExternalsError::RejectedReference {
                component: declaration.component().to_string(),
                reference: reference.to_string(),
                verdict,
            });
        }

        Ok(classification)
    }
}
