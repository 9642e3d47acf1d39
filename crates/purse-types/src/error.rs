use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid class name {0:?}: expected one or more ASCII letters")]
    InvalidClassName(String),

    #[error("invalid style object: {0}")]
    InvalidStyleObject(String),
}
