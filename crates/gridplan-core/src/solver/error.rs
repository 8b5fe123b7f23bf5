use std::fmt;

use crate::solver::config::SolverConfigError;

/// Loop of the solver a sweep or a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ValueIteration,
    PolicyEvaluation,
    PolicyImprovement,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ValueIteration => "value iteration",
            Phase::PolicyEvaluation => "policy evaluation",
            Phase::PolicyImprovement => "policy improvement",
        };
        f.write_str(name)
    }
}

/// Error type for solver construction and solve runs.
///
/// States and actions are carried in their `Debug` rendering so the error
/// stays independent of the model's types.
#[derive(Debug)]
pub enum SolveError {
    /// Solver parameters failed validation.
    Config(SolverConfigError),
    /// The model exposes no states at all.
    EmptyModel,
    /// `states()` listed the same state twice.
    DuplicateState { state: String },
    /// A terminal state declared outgoing actions.
    TerminalHasActions { state: String },
    /// A non-terminal state has no legal action, so no policy entry can exist.
    NoActions { state: String },
    /// A state reward is NaN or infinite.
    InvalidReward { state: String, value: f64 },
    /// A transition leads to a state that `states()` never listed.
    UnknownNextState {
        state: String,
        action: String,
        next: String,
    },
    /// A transition probability is negative, NaN or infinite.
    InvalidProbability {
        state: String,
        action: String,
        value: f64,
    },
    /// Transition probabilities of `(state, action)` do not sum to 1.
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },
    /// A loop hit its iteration bound before meeting its stopping rule.
    ///
    /// `iterations` counts sweeps for the sweeping phases and improvement rounds
    /// for [`Phase::PolicyImprovement`]; `delta` is the largest utility change
    /// seen in the last of them.
    DidNotConverge {
        phase: Phase,
        iterations: usize,
        delta: f64,
    },
}

impl SolveError {
    /// Return whether this error reports numerical non-convergence rather than bad input.
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, SolveError::DidNotConverge { .. })
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Config(err) => write!(f, "{err}"),
            SolveError::EmptyModel => write!(f, "model has no states"),
            SolveError::DuplicateState { state } => {
                write!(f, "state {state} is listed more than once")
            }
            SolveError::TerminalHasActions { state } => {
                write!(f, "state {state} is terminal and cannot declare actions")
            }
            SolveError::NoActions { state } => {
                write!(f, "state {state} is not terminal but has no actions")
            }
            SolveError::InvalidReward { state, value } => {
                write!(f, "invalid reward for state {state}: {value}")
            }
            SolveError::UnknownNextState {
                state,
                action,
                next,
            } => write!(
                f,
                "transition from state {state} under action {action} leads to unknown state {next}"
            ),
            SolveError::InvalidProbability {
                state,
                action,
                value,
            } => write!(
                f,
                "invalid probability for state {state}, action {action}: {value}"
            ),
            SolveError::ProbabilitySum {
                state,
                action,
                sum,
                tolerance,
            } => write!(
                f,
                "probability sum for state {state}, action {action} must be within {tolerance} of 1.0, got {sum}"
            ),
            SolveError::DidNotConverge {
                phase,
                iterations,
                delta,
            } => write!(
                f,
                "{phase} did not converge after {iterations} iterations (last delta {delta})"
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SolverConfigError> for SolveError {
    fn from(err: SolverConfigError) -> Self {
        SolveError::Config(err)
    }
}
