use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for grid and tabular MDP loading, validation, compilation, and builder operations.
pub enum MdpError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("grid must have at least one row and one column, got {height}x{width}")]
    EmptyGrid { height: usize, width: usize },

    #[error("{role} cell ({row}, {col}) lies outside the {height}x{width} grid")]
    CellOutOfBounds {
        role: &'static str,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("terminal cell ({row}, {col}) is a wall")]
    TerminalOnWall { row: usize, col: usize },

    #[error("start cell ({row}, {col}) is a wall")]
    StartOnWall { row: usize, col: usize },

    #[error("terminal cell ({row}, {col}) is declared more than once")]
    DuplicateTerminal { row: usize, col: usize },

    #[error("terminal cell ({row}, {col}) cannot be reached from any other cell")]
    UnreachableTerminal { row: usize, col: usize },

    #[error("invalid {role} reward: {value}")]
    InvalidGridReward { role: &'static str, value: f64 },

    #[error("invalid {name} probability: {value}")]
    InvalidSlipProbability { name: &'static str, value: f64 },

    #[error("slip probabilities must sum to within {tolerance} of 1.0, got {sum}")]
    SlipProbabilitySum { sum: f64, tolerance: f64 },

    #[error("start state '{start}' does not exist")]
    UnknownStartState { start: String },

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: String },

    #[error("duplicate action id '{action}' in state '{state}'")]
    DuplicateActionId { state: String, action: String },

    #[error("state '{state}' is terminal and cannot declare actions")]
    TerminalStateHasActions { state: String },

    #[error("state '{state}' is not terminal and must declare at least one action")]
    MissingActions { state: String },

    #[error("outcome in state '{state}', action '{action}' references unknown next state '{next}'")]
    UnknownNextState {
        state: String,
        action: String,
        next: String,
    },

    #[error(
        "invalid probability in state '{state}', action '{action}', outcome {outcome_index}: {value}"
    )]
    InvalidProbability {
        state: String,
        action: String,
        outcome_index: usize,
        value: f64,
    },

    #[error("invalid reward for state '{state}': {value}")]
    InvalidReward { state: String, value: f64 },

    #[error(
        "probability sum for state '{state}', action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("state '{state}' action '{action}' must contain at least one outcome")]
    EmptyOutcomes { state: String, action: String },

    #[error("builder referenced unknown state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("builder referenced unknown action '{action}' in state '{state}'")]
    BuilderUnknownAction { state: String, action: String },
}
