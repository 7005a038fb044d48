use thiserror::Error;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub(crate) enum SyncError {
    /// A category's parent has no id on the target, so the category cannot
    /// be placed correctly. Nothing further is created.
    #[error("parent category \"{parent}\" of \"{category}\" is missing; sync aborted")]
    MissingParent { category: String, parent: String },
}
