use miette::Diagnostic;
use thiserror::Error;

/// Errors from the incremental container merge.
///
/// Resolution and compilation are total and have no error type; the merge
/// is the one core operation that can fail, and it fails loudly rather
/// than falling back to a full rewrite of a file it cannot recognize.
#[derive(Debug, Error, Diagnostic)]
pub enum MergeError {
    #[error("container class '{container}' not found in the existing file")]
    #[diagnostic(
        code(entigen::container_not_found),
        help(
            "check that the file passed to update is the generated container, or run a full scaffold to recreate it"
        )
    )]
    ContainerNotFound { container: String },
}
