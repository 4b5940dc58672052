use thiserror::Error;

/// Reasons an execution facility could not start a command.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("command not found")]
    NotFound,
    #[error("empty command")]
    EmptyCommand,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Reasons a reap of an outstanding child did not produce a handle.
#[derive(Debug, Error)]
pub enum WaitError {
    /// Nothing is left to reap, so the awaited handle can never be observed.
    #[error("no outstanding children")]
    NoChildren,
    #[error("wait failed: {0}")]
    Os(String),
}
