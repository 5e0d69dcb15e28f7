pub mod create;
pub mod helper;
pub mod init;
pub mod list;

use crate::core::MatchResult;
use crate::document::LineEdit;

pub use helper::FileFailure;

/// Pending or applied line changes of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub edits: Vec<LineEdit>,
}

/// Outcome of a `create` run.
#[derive(Debug)]
pub struct CreateSummary {
    /// Number of resource files that were parsed and walked.
    pub files_checked: usize,
    pub changes: Vec<FileChange>,
    /// Every visited field, for the verbose audit listing.
    pub results: Vec<MatchResult>,
    /// Annotations with no source line to be written on.
    pub unwritable_count: usize,
    pub is_apply: bool,
}
