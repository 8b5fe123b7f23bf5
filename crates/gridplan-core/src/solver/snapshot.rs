use std::hash::Hash;

use serde::Serialize;

use crate::solver::solution::{Solution, SolveStats};

#[derive(Debug, Clone, Serialize)]
pub struct SolutionSnapshot {
    pub schema_version: u32,
    pub stats: SolveStats,
    pub utilities: Vec<UtilityEntrySnapshot>,
    pub policy: Vec<PolicyEntrySnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UtilityEntrySnapshot {
    pub state: String,
    pub utility: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyEntrySnapshot {
    pub state: String,
    pub action: String,
}

impl SolutionSnapshot {
    /// Flatten a solution into labelled entries, in model state order.
    ///
    /// `action_label` also receives the state, for models whose action
    /// handles are only meaningful per state.
    pub fn from_solution<S, A, FS, FA>(
        solution: &Solution<S, A>,
        mut state_label: FS,
        mut action_label: FA,
    ) -> Self
    where
        S: Clone + Eq + Hash,
        A: Copy,
        FS: FnMut(&S) -> String,
        FA: FnMut(&S, A) -> String,
    {
        let utilities = solution
            .utilities()
            .iter()
            .map(|(state, utility)| UtilityEntrySnapshot {
                state: state_label(state),
                utility,
            })
            .collect();

        let policy = solution
            .policy()
            .iter()
            .map(|(state, action)| PolicyEntrySnapshot {
                state: state_label(state),
                action: action_label(state, action),
            })
            .collect();

        SolutionSnapshot {
            schema_version: 1,
            stats: *solution.stats(),
            utilities,
            policy,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
