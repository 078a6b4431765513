/// What a reference resolved to at the moment it was probed.
///
/// Never cached: tags and remote branches can appear or vanish between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceClassification {
    pub is_tag: bool,
    pub is_branch: bool,
    pub is_hash: bool,
}

/// Whether a reference can be checked out as a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagVerdict {
    Unique,
    /// Not a tag or branch, but a commit (a raw hash): treated like a tag.
    PseudoTag,
    BothBranchAndTag,
    BranchNotTag,
    Unresolved,
}

impl ReferenceClassification {
    pub fn new(is_tag: bool, is_branch: bool, is_hash: bool) -> Self {
        Self {
            is_tag,
            is_branch,
            is_hash,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_tag || self.is_branch || self.is_hash
    }

    pub fn tag_verdict(&self) -> TagVerdict {
        match (self.is_tag, self.is_branch, self.is_hash) {
            (true, false, _) => TagVerdict::Unique,
            (true, true, _) => TagVerdict::BothBranchAndTag,
            (false, true, _) => TagVerdict::BranchNotTag,
            (false, false, true) => TagVerdict::PseudoTag,
            (false, false, false) => TagVerdict::Unresolved,
        }
    }

    pub fn is_unique_tag(&self) -> bool {
        matches!(
            self.tag_verdict(),
            TagVerdict::Unique | TagVerdict::PseudoTag
        )
    }
}

impl TagVerdict {
    pub fn explanation(&self) -> &'static str {
        match self {
            TagVerdict::Unique | TagVerdict::PseudoTag => "is ok",
            TagVerdict::BothBranchAndTag => {
                "is both a branch and a tag. git may checkout the branch instead of the tag \
                 depending on your version of git."
            }
            TagVerdict::BranchNotTag => {
                "is a branch, and not a tag. If you intended to checkout a branch, please change \
                 the externals description to be a branch. If you intended to checkout a tag, it \
                 does not exist. Please check the name."
            }
            TagVerdict::Unresolved => {
                "does not appear to be a valid tag, branch or hash! Please check the name and \
                 repository."
            }
        }
    }
}
