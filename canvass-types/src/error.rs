/// Error type for survey builder operations.
///
/// Most builder operations against missing targets are silent no-ops;
/// only structurally invalid requests are rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// A reorder was requested with an index outside the question list.
    #[error("cannot move question from {from} to {to} in a list of {len}")]
    ReorderOutOfRange { from: usize, to: usize, len: usize },
}

/// Error type for authentication operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no account registered for {0}")]
    UserNotFound(String),

    #[error("an account already exists for {0}")]
    EmailTaken(String),
}
