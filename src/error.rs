use std::io;

/// The error type used across the crate.
///
/// All variants are local, non-retryable conditions detected at the
/// boundary where they occur.  A failed match during the search is not an
/// error but a normal state driving recursion termination, so it does not
/// appear here.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// An out-of-range access on a sequence.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A line exceeded the configured maximum length while constructing a
    /// line sequence.
    #[error("line {line} is {len} characters long which exceeds the maximum of {max}")]
    LineTooLong { line: usize, len: usize, max: usize },
    /// The underlying input could not be read.
    #[error("failed to read input")]
    Io(#[from] io::Error),
    /// A diff report was requested before a run completed.
    #[error("diff report requested before a run completed")]
    NotReady,
}
