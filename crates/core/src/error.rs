use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Resolution-layer failures never surface through this type -- missing or
/// unreadable content degrades to "step inapplicable" at the resolver.
/// State-machine failures (`InvalidStep`, `UnknownVisitor`, `SkipNotAllowed`)
/// are surfaced verbatim so the delivery channel can prompt a retry/restart.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A step confirmation outside the session's applicable/ordered set.
    /// The flow state is unchanged when this is returned.
    #[error("Invalid step: {0}")]
    InvalidStep(String),

    /// The visitor is not part of the active flow handle. Rejected before
    /// any state mutation.
    #[error("Visitor {0} is not part of this flow")]
    UnknownVisitor(DbId),

    /// A free-mode skip was invoked under a strict-channel policy.
    #[error("Skipping the training is not allowed on this channel")]
    SkipNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}
