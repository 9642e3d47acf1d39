/// Errors reported by a [`StyleSink`](crate::StyleSink).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The sink refused the rule text.
    #[error("could not add style rule {rule}: {reason}")]
    Rejected { rule: String, reason: String },

    /// The sink has no stylesheet to write into.
    #[error("could not add style rule {0}: stylesheet is detached")]
    Detached(String),
}

/// Result alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A rule could not be inserted while running in strict mode.
    #[error("could not add style rule {rule}")]
    RuleRejected {
        rule: String,
        #[source]
        source: SinkError,
    },
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
