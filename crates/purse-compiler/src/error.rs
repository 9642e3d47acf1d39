//! Error types for style compilation.

use purse_hash::HasherError;

/// Errors that can occur while compiling style objects.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The grouped declarations could not be hashed.
    #[error("failed to hash compiled declarations: {0}")]
    Hash(#[from] HasherError),
}

/// Convenience alias for compiler results.
pub type CompileResult<T> = Result<T, CompileError>;
