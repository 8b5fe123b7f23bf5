mod solver;

pub use solver::bellman::TIE_TOLERANCE;
pub use solver::config::{Algorithm, SolverConfig, SolverConfigError};
pub use solver::error::{Phase, SolveError};
pub use solver::model::{FiniteMdp, PROB_TOLERANCE};
pub use solver::snapshot::{PolicyEntrySnapshot, SolutionSnapshot, UtilityEntrySnapshot};
pub use solver::solution::{Policy, Solution, SolveStats, Utilities};
pub use solver::solve::{SolveEvent, Solver, solve};
