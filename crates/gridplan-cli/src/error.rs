use gridplan_core::{SolveError, SolverConfigError};
use gridplan_mdp::MdpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] SolverConfigError),

    #[error("invalid model: {0}")]
    Model(#[from] MdpError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("failed to serialize solution: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}
