use thiserror::Error;

/// Contract violations at the slice-based model entry point.
///
/// The engine itself has no recoverable runtime errors: shapes are fixed at
/// compile time and arithmetic overflow saturates silently. The only thing a
/// collaborator can get wrong is the length of a buffer it hands in.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    #[error("input buffer holds {actual} values, model expects {expected}")]
    InputLength { expected: usize, actual: usize },
    #[error("output buffer holds {actual} values, model produces {expected}")]
    OutputLength { expected: usize, actual: usize },
}
